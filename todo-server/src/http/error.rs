//! JSON error responses
//!
//! Body shape is always `{"code": ..., "message": ...}`. Untyped storage
//! errors are logged and rendered as a generic 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::{AppError, ServiceError};

/// Message shown for failures that are not `AppError`s.
pub const FALLBACK_MESSAGE: &str = "An internal server error occurred.";

fn error_body(status: StatusCode, code: &str, message: &str) -> Response {
    (status, Json(json!({ "code": code, "message": message }))).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error_body(self.status(), self.code(), self.message())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            Self::App(e) => e.into_response(),
            Self::Store(e) => {
                // Log the actual error, return generic message
                tracing::error!("Unhandled storage error: {}", e);
                error_body(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    FALLBACK_MESSAGE,
                )
            }
        }
    }
}
