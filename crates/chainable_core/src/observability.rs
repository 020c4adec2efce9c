//! Tracing subscriber initialization.

use chainable_error::ConfigError;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install a formatted tracing subscriber at the `info` level.
///
/// `RUST_LOG` overrides the level when set. See [`init_observability_with_filter`].
pub fn init_observability() -> Result<(), ConfigError> {
    init_observability_with_filter("info")
}

/// Install a formatted tracing subscriber with the given default filter.
///
/// The `RUST_LOG` environment variable takes precedence over `default_filter`.
///
/// # Errors
///
/// Returns an error if `default_filter` is not a valid filter directive or if a
/// global subscriber has already been installed.
pub fn init_observability_with_filter(default_filter: &str) -> Result<(), ConfigError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter).map_err(|e| {
            ConfigError::new(format!("Invalid log filter '{}': {}", default_filter, e))
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .try_init()
        .map_err(|e| ConfigError::new(format!("Failed to install tracing subscriber: {}", e)))?;

    info!(default_filter, "Tracing initialized");
    Ok(())
}
