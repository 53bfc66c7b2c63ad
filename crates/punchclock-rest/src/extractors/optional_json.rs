//! JSON body extractor that tolerates an empty body.

use crate::responses::AppError;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use punchclock_core::PunchError;
use serde::de::DeserializeOwned;

/// Deserializes the body as JSON, or yields `T::default()` when it is empty.
///
/// No `Content-Type` is required, so bare `POST`s and `GET`s both work.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionalJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for OptionalJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError(PunchError::validation(format!("Unreadable body: {}", e))))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| AppError(PunchError::validation(format!("Invalid JSON: {}", e))))
    }
}
