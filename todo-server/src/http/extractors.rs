//! Custom Axum extractors
//!
//! Both reject with an `AppError` so clients always see the
//! `{"code", "message"}` body instead of axum's plain-text rejections.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::AppError;

pub const INVALID_ID: &str = "Invalid ID.";
pub const INVALID_JSON: &str = "Invalid JSON format.";

/// Extract a numeric todo id from the path
pub struct TodoId(pub i64);

impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request(INVALID_ID))?;

        raw.parse::<i64>()
            .map(Self)
            .map_err(|_| AppError::bad_request(INVALID_ID))
    }
}

/// JSON body decoded without regard to `Content-Type`.
///
/// A top-level `null` yields `T::default()`.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| AppError::bad_request(INVALID_JSON))?;

        serde_json::from_slice::<Option<T>>(&bytes)
            .map(|body| Self(body.unwrap_or_default()))
            .map_err(|e| {
                tracing::debug!(error = %e, "rejected request body");
                AppError::bad_request(INVALID_JSON)
            })
    }
}
