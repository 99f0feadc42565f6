//! Logging subscriber setup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

/// Error type for logging setup.
#[derive(Debug, thiserror::Error)]
pub enum ObservabilityError {
    /// The configured level is not a valid filter directive.
    #[error("invalid log filter '{filter}': {message}")]
    InvalidFilter {
        /// The rejected directive.
        filter: String,
        /// Parser message.
        message: String,
    },
    /// The configured format is unknown.
    #[error("unknown log format '{0}'")]
    UnknownFormat(String),
    /// Failed to initialize tracing subscriber.
    #[error("failed to initialize tracing subscriber: {0}")]
    SubscriberError(String),
}

/// Install the global logging subscriber.
///
/// `RUST_LOG` takes precedence over `config.level`.
///
/// # Errors
///
/// Returns an error if the level or format is invalid, or if a global
/// subscriber has already been set.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ObservabilityError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(&config.level)?,
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match config.format.as_str() {
        "pretty" => registry.with(tracing_subscriber::fmt::layer().pretty()).try_init(),
        "compact" => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init(),
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init(),
        other => return Err(ObservabilityError::UnknownFormat(other.to_string())),
    };
    result.map_err(|e| ObservabilityError::SubscriberError(e.to_string()))?;

    tracing::debug!(
        level = %config.level,
        format = %config.format,
        "Logging initialized"
    );
    Ok(())
}

fn build_filter(level: &str) -> Result<EnvFilter, ObservabilityError> {
    EnvFilter::try_new(level).map_err(|e| ObservabilityError::InvalidFilter {
        filter: level.to_string(),
        message: e.to_string(),
    })
}
