//! Startup orchestration.
//!
//! Order: settings → config → logger → metrics → listener. Any error before
//! the listener is bound is fatal.

use std::sync::Arc;

use crate::config::{LoggingConfig, ObservabilityConfig};
use crate::observability::logging::{LogError, LoggerHandle, LoggerRegistry};
use crate::observability::metrics;

/// Acquire the service logger and install it as the global subscriber.
pub fn init_logging(
    registry: &LoggerRegistry,
    config: &LoggingConfig,
) -> Result<Arc<LoggerHandle>, LogError> {
    let handle = registry.acquire_with(&config.logger_name, config.options.clone())?;
    handle.install()?;
    Ok(handle)
}

/// Start the Prometheus endpoint when enabled.
pub fn init_metrics(config: &ObservabilityConfig) {
    if !config.metrics_enabled {
        return;
    }

    match config.metrics_address.parse() {
        Ok(addr) => metrics::init_metrics(addr),
        Err(_) => tracing::error!(
            metrics_address = %config.metrics_address,
            "Failed to parse metrics address"
        ),
    }
}
