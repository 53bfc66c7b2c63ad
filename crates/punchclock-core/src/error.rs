//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for all layers of Punchclock.
///
/// Every variant maps onto exactly one HTTP status; handlers never pick a
/// status code themselves.
#[derive(Error, Debug)]
pub enum PunchError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict error (e.g., duplicate entry, punching in twice)
    #[error("Conflict: {0}")]
    Conflict(String),

    // ============ Authentication Errors ============
    /// Unauthorized access
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Invalid token
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token expired
    #[error("Token expired")]
    TokenExpired,

    /// Session missing, expired, or malformed
    #[error("Session not found or expired: {0}")]
    SessionNotFound(String),

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Key-value session store error
    #[error("Session store error: {0}")]
    SessionStore(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PunchError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Unauthorized(_)
            | Self::InvalidToken(_)
            | Self::TokenExpired
            | Self::SessionNotFound(_) => 401,
            Self::Database(_)
            | Self::SessionStore(_)
            | Self::Configuration(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::InvalidToken(_) => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::SessionNotFound(_) => "SESSION_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::SessionStore(_) => "SESSION_STORE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates an unauthorized error.
    #[must_use]
    pub fn unauthorized<T: Into<String>>(message: T) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true for errors caused by the server rather than the caller.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for PunchError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                // MySQL ER_DUP_ENTRY
                if db_err.code().is_some_and(|code| code == "23000" || code == "1062") {
                    return Self::Conflict(db_err.message().to_string());
                }
                Self::Database(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for PunchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `PunchError`.
    #[must_use]
    pub fn from_error(error: &PunchError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
        }
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&PunchError> for ErrorResponse {
    fn from(error: &PunchError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(PunchError::not_found("User", "a@example.com").status_code(), 404);
        assert_eq!(PunchError::validation("bad email").status_code(), 400);
        assert_eq!(PunchError::unauthorized("no session").status_code(), 401);
        assert_eq!(PunchError::conflict("already punched in").status_code(), 409);
        assert_eq!(PunchError::SessionNotFound("abc".to_string()).status_code(), 401);
        assert_eq!(PunchError::TokenExpired.status_code(), 401);
        assert_eq!(PunchError::Database("down".to_string()).status_code(), 500);
        assert_eq!(PunchError::SessionStore("down".to_string()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(PunchError::not_found("User", 1).error_code(), "NOT_FOUND");
        assert_eq!(PunchError::TokenExpired.error_code(), "TOKEN_EXPIRED");
        assert_eq!(
            PunchError::SessionNotFound("x".to_string()).error_code(),
            "SESSION_NOT_FOUND"
        );
        assert_eq!(PunchError::internal("oops").error_code(), "INTERNAL_ERROR");
        assert_eq!(
            PunchError::Other(anyhow::anyhow!("boom")).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_server_error_classification() {
        assert!(PunchError::Database("lost".to_string()).is_server_error());
        assert!(!PunchError::conflict("dup").is_server_error());
        assert!(!PunchError::InvalidToken("bad".to_string()).is_server_error());
    }

    #[test]
    fn test_error_display() {
        let err = PunchError::not_found("User", "someone@example.com");
        assert!(err.to_string().contains("User"));
        assert!(err.to_string().contains("someone@example.com"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not-json").unwrap_err();
        let err: PunchError = json_err.into();
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_error_response_from_error() {
        let err = PunchError::conflict("already punched in");
        let response = ErrorResponse::from(&err);
        assert_eq!(response.code, "CONFLICT");
        assert!(response.message.contains("already punched in"));
        assert!(response.details.is_none());
    }

    #[test]
    fn test_error_response_with_details() {
        let err = PunchError::validation("bad input");
        let response = ErrorResponse::from_error(&err).with_details(vec![FieldError {
            field: "email".to_string(),
            message: "Invalid email".to_string(),
            code: "email".to_string(),
        }]);
        assert_eq!(response.details.map(|d| d.len()), Some(1));
    }
}
