//! API response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use punchclock_core::{ErrorResponse, PunchError};
use serde::Serialize;
use tracing::{debug, error};

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub PunchError);

impl From<PunchError> for AppError {
    fn from(err: PunchError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_server_error() {
            error!(code = self.0.error_code(), "Request failed: {}", self.0);
        } else {
            debug!(code = self.0.error_code(), status = status.as_u16(), "Request rejected: {}", self.0);
        }

        (status, Json(ErrorResponse::from_error(&self.0))).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Helper to create a success response.
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(data))
}

/// Helper to create a created (201) response.
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

/// Helper to create a no content (204) response.
pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (PunchError::validation("bad"), StatusCode::BAD_REQUEST),
            (PunchError::SessionNotFound("x".into()), StatusCode::UNAUTHORIZED),
            (PunchError::not_found("User", "a@example.com"), StatusCode::NOT_FOUND),
            (PunchError::conflict("twice"), StatusCode::CONFLICT),
            (PunchError::Database("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(AppError(err).into_response().status(), status);
        }
    }
}
