//! Validation utilities.

use crate::{FieldError, PunchError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `PunchError` on failure.
    fn validate_request(&self) -> Result<(), PunchError> {
        self.validate().map_err(validation_errors_to_punch_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

/// Converts `validator::ValidationErrors` to `PunchError`.
#[must_use]
pub fn validation_errors_to_punch_error(errors: ValidationErrors) -> PunchError {
    let message = field_errors(&errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    PunchError::Validation(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(email(message = "Invalid email"))]
        email: String,
        #[validate(length(min = 1, message = "Token is required"))]
        token: String,
    }

    #[test]
    fn test_validate_request_collects_fields() {
        let sample = Sample {
            email: "nope".to_string(),
            token: String::new(),
        };
        let err = sample.validate_request().unwrap_err();
        assert_eq!(err.status_code(), 400);
        let message = err.to_string();
        assert!(message.contains("email: Invalid email"));
        assert!(message.contains("token: Token is required"));
    }

    #[test]
    fn test_validate_request_passes() {
        let sample = Sample {
            email: "worker@example.com".to_string(),
            token: "abc".to_string(),
        };
        assert!(sample.validate_request().is_ok());
    }
}
