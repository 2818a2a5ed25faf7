use crate::domain::context::ContextError;
use crate::domain::product::errors::ProductError;

/// Repository errors for domain layer.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository.database_error: {0}")]
    DatabaseError(String),
    #[error("repository.duplicated")]
    Duplicated,
    #[error("repository.cancelled")]
    Cancelled,
    #[error("repository.deadline_exceeded")]
    DeadlineExceeded,
}

impl RepositoryError {
    pub fn database_error(reason: impl Into<String>) -> Self {
        RepositoryError::DatabaseError(reason.into())
    }
}

impl From<ContextError> for RepositoryError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::Cancelled => RepositoryError::Cancelled,
            ContextError::DeadlineExceeded => RepositoryError::DeadlineExceeded,
        }
    }
}

/// The four error classes a use case can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Internal,
    InvalidInput,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "VALIDATION"),
            ErrorKind::NotFound => write!(f, "NOT_FOUND"),
            ErrorKind::Internal => write!(f, "INTERNAL"),
            ErrorKind::InvalidInput => write!(f, "INVALID_INPUT"),
        }
    }
}

/// Error returned by every use case.
///
/// Exactly one variant per failure; the controller maps [`AppError::kind`]
/// to a transport status and never needs to inspect the cause.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Input violates a domain invariant.
    #[error("{message}")]
    Validation {
        message: String,
        #[source]
        source: Option<ProductError>,
    },
    /// The requested resource does not exist.
    #[error("{message}")]
    NotFound { message: String },
    /// A collaborator failed unexpectedly.
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: Option<RepositoryError>,
    },
    /// A request-level parameter is malformed.
    #[error("{message}")]
    InvalidInput { message: String },
}

impl AppError {
    pub fn validation(err: ProductError) -> Self {
        AppError::Validation {
            message: err.to_string(),
            source: Some(err),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(err: RepositoryError) -> Self {
        AppError::Internal {
            message: "internal_error".to_string(),
            source: Some(err),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        AppError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation { .. } => ErrorKind::Validation,
            AppError::NotFound { .. } => ErrorKind::NotFound,
            AppError::Internal { .. } => ErrorKind::Internal,
            AppError::InvalidInput { .. } => ErrorKind::InvalidInput,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::Validation { message, .. }
            | AppError::NotFound { message }
            | AppError::Internal { message, .. }
            | AppError::InvalidInput { message } => message,
        }
    }
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        AppError::validation(err)
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn should_map_product_error_to_validation() {
        let err: AppError = ProductError::NameEmpty.into();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "product.name_empty");
        assert!(err.source().is_some());
    }

    #[test]
    fn should_map_repository_error_to_internal_and_keep_cause() {
        let err: AppError = RepositoryError::database_error("connection reset").into();

        assert_eq!(err.kind(), ErrorKind::Internal);
        let cause = err.source().map(|s| s.to_string());
        assert_eq!(
            cause.as_deref(),
            Some("repository.database_error: connection reset")
        );
    }

    #[test]
    fn should_map_context_errors_to_distinct_repository_errors() {
        assert!(matches!(
            RepositoryError::from(ContextError::Cancelled),
            RepositoryError::Cancelled
        ));
        assert!(matches!(
            RepositoryError::from(ContextError::DeadlineExceeded),
            RepositoryError::DeadlineExceeded
        ));
    }

    #[test]
    fn should_not_carry_cause_when_not_found_or_invalid_input() {
        let not_found = AppError::not_found("product.not_found");
        let invalid = AppError::invalid_input("pagination.invalid_page");

        assert_eq!(not_found.kind(), ErrorKind::NotFound);
        assert_eq!(invalid.kind(), ErrorKind::InvalidInput);
        assert!(not_found.source().is_none());
        assert!(invalid.source().is_none());
        assert_eq!(invalid.to_string(), "pagination.invalid_page");
    }
}
