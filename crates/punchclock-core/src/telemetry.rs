//! Logging initialization.
//!
//! Installs a global `tracing` subscriber with an `EnvFilter` and either the
//! human-readable or the JSON formatter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, colored output for local development.
    #[default]
    Pretty,
    /// One JSON object per line for log shippers.
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Directive used when neither `RUST_LOG` nor configuration supplies one.
pub const DEFAULT_LOG_DIRECTIVE: &str = "info,punchclock=debug,tower_http=debug";

/// Builds the filter directive for a configured base level.
#[must_use]
pub fn log_directive(level: &str) -> String {
    let level = level.trim();
    if level.is_empty() {
        return DEFAULT_LOG_DIRECTIVE.to_string();
    }
    format!("{level},tower_http=debug")
}

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `level` when set. Calling this twice is harmless;
/// the second installation is ignored.
#[cfg(feature = "telemetry")]
pub fn init_logging(level: &str, format: LogFormat) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_directive(level)));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(true),
            )
            .try_init(),
    };

    if let Err(e) = result {
        tracing::debug!("Logging already initialized: {}", e);
    }
}
