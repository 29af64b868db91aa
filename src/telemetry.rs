//! Tracing initialization from [`LoggingConfig`].

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use payflow_core::config::logging::LoggingConfig;
use payflow_core::error::PayflowError;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the configured level. Fails with a configuration
/// error if a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), PayflowError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| {
            PayflowError::configuration(format!("Invalid log level '{}': {e}", config.level))
        })?;

    let result = match config.format.as_str() {
        "json" => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .try_init(),
        "pretty" => fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
        other => {
            return Err(PayflowError::configuration(format!(
                "Unknown log format '{other}', expected 'json' or 'pretty'"
            )));
        }
    };

    result
        .map_err(|e| PayflowError::configuration(format!("Failed to install subscriber: {e}")))?;

    info!(level = %config.level, format = %config.format, "Tracing initialized");
    Ok(())
}
