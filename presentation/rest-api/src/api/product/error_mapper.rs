use std::error::Error;

use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::errors::{AppError, ErrorKind};

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for AppError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let status = match self.kind() {
            ErrorKind::Validation | ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, cause = ?self.source(), "request failed");
        }

        (
            status,
            Json(ErrorResponse {
                code: status.as_u16(),
                error_type: self.kind().to_string(),
                message: self.message().to_string(),
                details: self.source().map(|cause| cause.to_string()),
            }),
        )
    }
}
