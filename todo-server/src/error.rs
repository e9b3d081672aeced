//! Error types for todo-server
//!
//! Two tiers: `RepoError` comes out of the storage layer, `AppError` is what
//! the use cases hand to the HTTP boundary. `ServiceError` carries either.

use axum::http::StatusCode;
use thiserror::Error;

use crate::db::repos::RepoError;

/// Typed application error with a status, a machine code, and a message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalServerError(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(m) | Self::NotFound(m) | Self::InternalServerError(m) => m,
        }
    }
}

/// Result of a use-case operation.
///
/// `Store` is an untranslated storage failure; the boundary renders it as a
/// generic 500 without exposing the cause.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("storage error: {0}")]
    Store(#[from] RepoError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_statuses() {
        let cases = [
            (AppError::bad_request("x"), StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            (AppError::not_found("x"), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (
                AppError::internal("x"),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
            ),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status(), status);
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn display_is_the_message() {
        let err = AppError::not_found("Todo not found.");
        assert_eq!(err.to_string(), "Todo not found.");
        assert_eq!(err.message(), "Todo not found.");
    }
}
