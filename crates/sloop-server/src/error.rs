//! HTTP error types for the Swagger Sloop server.
//!
//! Maps render errors from `sloop-core` into HTTP responses. Every error
//! variant produces a JSON body with a machine-readable `error` field and a
//! human-readable `message`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use sloop_core::error::{AssetError, RenderError};

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Requested resource not found.
    NotFound(String),
    /// Client sent invalid input.
    BadRequest(String),
    /// Request lacks a valid session.
    Unauthorized(String),
    /// Internal server error. The detail is logged, never sent.
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal server error".to_owned(),
                )
            }
        };

        let body = ErrorBody {
            error: error_type,
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::TemplateNotFound { .. } => Self::NotFound(err.to_string()),
            RenderError::Template(_) | RenderError::Asset(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<AssetError> for AppError {
    fn from(err: AssetError) -> Self {
        Self::Internal(err.to_string())
    }
}
