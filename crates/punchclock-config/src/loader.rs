//! Configuration loader with layered sources.

use crate::{AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use punchclock_core::PunchError;
use std::path::Path;
use tracing::{debug, info, warn};

/// Prefix for environment variable overrides, e.g. `PUNCHCLOCK_DATABASE__URL`.
pub const ENV_PREFIX: &str = "PUNCHCLOCK";

/// Loads and validates the layered configuration once at startup.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Untracked local overrides
    /// 4. Environment variables with `PUNCHCLOCK_` prefix
    pub fn new(config_dir: impl AsRef<Path>) -> Result<Self, PunchError> {
        let config = Self::load_config(config_dir.as_ref())?;
        Ok(Self { config })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, PunchError> {
        Self::new("./config")
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    #[must_use]
    pub fn into_inner(self) -> AppConfig {
        self.config
    }

    fn load_config(config_dir: &Path) -> Result<AppConfig, PunchError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let env_override = std::env::var("PUNCHCLOCK_ENVIRONMENT").ok();
        let environment = env_override
            .clone()
            .unwrap_or_else(|| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = config_dir.join(format!("{name}.toml"));
            if path.exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let mut app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_punch_error)?;

        if let Some(environment) = env_override {
            app_config.app.environment = environment;
        }

        if ConfigValidator::uses_default_secret_in_production(&app_config) {
            warn!("Using the default token secret in production! This is a security risk.");
        }

        ConfigValidator::validate_or_error(&app_config)?;

        Ok(app_config)
    }
}

fn config_error_to_punch_error(err: ConfigError) -> PunchError {
    PunchError::Configuration(err.to_string())
}
