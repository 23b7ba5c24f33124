//! API error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use boekhoud_core::document::DocumentError;
use boekhoud_core::export::ExportError;
use boekhoud_core::review::ReviewError;
use boekhoud_core::vat::VatError;
use boekhoud_shared::AppError;

/// Error type returned by all handlers.
///
/// Carries the HTTP status, a stable machine-readable code, and a
/// human-readable message; rendered as `{"error": ..., "message": ...}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Build an error from its parts.
    #[must_use]
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// 400 with a validation code, for malformed request input.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
    }

    fn from_status(status: u16, code: &'static str, message: String) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            code,
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = self.code, message = %self.message, "request failed");
        }
        (
            self.status,
            Json(json!({ "error": self.code, "message": self.message })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::from_status(err.status_code(), err.error_code(), err.to_string())
    }
}

impl From<DocumentError> for ApiError {
    fn from(err: DocumentError) -> Self {
        Self::from_status(err.status_code(), err.error_code(), err.to_string())
    }
}

impl From<ReviewError> for ApiError {
    fn from(err: ReviewError) -> Self {
        Self::from_status(err.status_code(), err.error_code(), err.to_string())
    }
}

impl From<VatError> for ApiError {
    fn from(err: VatError) -> Self {
        Self::from_status(err.status_code(), err.error_code(), err.to_string())
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        Self::from_status(err.status_code(), err.error_code(), err.to_string())
    }
}
