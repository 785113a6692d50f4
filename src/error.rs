//! Application error types and HTTP status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

/// Error model used throughout request parsing, validation, and translation.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Client input rejected by validation (`400`).
    #[error("{0}")]
    InvalidRequest(String),
    /// Request body failed schema-level parsing (`422`).
    #[error("{0}")]
    Unprocessable(String),
    /// Unexpected internal failure (`500`); details are logged, not returned.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Creates a `400 Bad Request` validation error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Creates a `422 Unprocessable Entity` body-shape error.
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::Unprocessable(message.into())
    }

    /// Creates a generic internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// Wire shape for error responses: `{"detail": "..."}`.
#[derive(Debug, Serialize)]
struct ErrorPayload {
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::InvalidRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Unprocessable(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Internal(message) => {
                error!(error = %message, "internal translation service error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal translation service error".to_string(),
                )
            }
        };

        (status, Json(ErrorPayload { detail })).into_response()
    }
}
