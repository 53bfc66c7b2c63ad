//! Configuration validation.
//!
//! All problems are collected before reporting so a broken deployment
//! shows every mistake at once.

use crate::{AppConfig, DEFAULT_TOKEN_SECRET};
use punchclock_core::PunchError;
use thiserror::Error;

/// A single invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    /// A port of zero cannot be bound.
    #[error("Invalid port for {name}: {value} (must be 1-65535)")]
    InvalidPort { name: String, value: u16 },

    /// Pool bounds are inverted.
    #[error("Invalid pool size: min ({min}) cannot be greater than max ({max})")]
    InvalidPoolSize { min: u32, max: u32 },

    /// URL is empty or has the wrong scheme.
    #[error("Invalid {url_type} URL: {message}")]
    InvalidUrl { url_type: String, message: String },

    /// A duration that must be positive is zero.
    #[error("Timeout '{name}' must be positive, got {value}")]
    NonPositiveTimeout { name: String, value: u64 },

    /// Records page size is zero.
    #[error("attendance.page_size must be positive")]
    ZeroPageSize,

    /// An hourly rate is zero or negative.
    #[error("Hourly rate for '{role}' must be positive, got {value}")]
    NonPositiveRate { role: String, value: i64 },

    /// Signature verification is on but there is nothing to verify with.
    #[error("security.token_secret is required when verify_signature is enabled")]
    MissingTokenSecret,

    /// Log level is not one `tracing` understands.
    #[error("Invalid log level: '{value}' (valid: trace, debug, info, warn, error)")]
    InvalidLogLevel { value: String },
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];

    /// Validates the entire application configuration.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_server(config, &mut errors);
        Self::validate_database(config, &mut errors);
        Self::validate_redis(config, &mut errors);
        Self::validate_security(config, &mut errors);
        Self::validate_attendance(config, &mut errors);
        Self::validate_observability(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Like [`Self::validate`], folded into a single `PunchError`.
    pub fn validate_or_error(config: &AppConfig) -> Result<(), PunchError> {
        Self::validate(config).map_err(|errors| {
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            PunchError::Configuration(message)
        })
    }

    /// Returns true when a production deployment still carries the shipped secret.
    #[must_use]
    pub fn uses_default_secret_in_production(config: &AppConfig) -> bool {
        config.is_production()
            && config.security.verify_signature
            && config.security.token_secret == DEFAULT_TOKEN_SECRET
    }

    fn validate_server(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.server.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                name: "server.port".to_string(),
                value: 0,
            });
        }
        if config.server.request_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "server.request_timeout_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_database(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let db = &config.database;
        if db.url.trim().is_empty() {
            errors.push(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: "URL cannot be empty".to_string(),
            });
        } else if !db.url.starts_with("mysql://") && !db.url.starts_with("mariadb://") {
            errors.push(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: "URL must start with mysql:// or mariadb://".to_string(),
            });
        }

        if db.min_connections > db.max_connections {
            errors.push(ConfigValidationError::InvalidPoolSize {
                min: db.min_connections,
                max: db.max_connections,
            });
        }
        if db.connect_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "database.connect_timeout_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_redis(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let url = &config.redis.url;
        if !url.starts_with("redis://") && !url.starts_with("rediss://") {
            errors.push(ConfigValidationError::InvalidUrl {
                url_type: "redis".to_string(),
                message: "URL must start with redis:// or rediss://".to_string(),
            });
        }
    }

    fn validate_security(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.security.verify_signature && config.security.token_secret.is_empty() {
            errors.push(ConfigValidationError::MissingTokenSecret);
        }
        if config.session.ttl_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "session.ttl_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_attendance(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.attendance.page_size == 0 {
            errors.push(ConfigValidationError::ZeroPageSize);
        }
        for (role, value) in config.attendance.rates.entries() {
            if value <= 0 {
                errors.push(ConfigValidationError::NonPositiveRate {
                    role: role.to_string(),
                    value,
                });
            }
        }
    }

    fn validate_observability(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let level = config.observability.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: config.observability.log_level.clone(),
            });
        }
    }
}
