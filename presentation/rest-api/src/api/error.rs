use poem::http::StatusCode;
use poem_openapi::{Object, payload::Json};

/// Error body shared by every endpoint.
#[derive(Object, Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    /// HTTP status code
    pub code: u16,
    /// Error class: VALIDATION, NOT_FOUND, INTERNAL or INVALID_INPUT
    #[oai(rename = "type")]
    pub error_type: String,
    /// Code-style error identifier
    pub message: String,
    /// Underlying cause, when one is known
    #[oai(skip_serializing_if_is_none)]
    pub details: Option<String>,
}

pub trait IntoErrorResponse {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>);
}
