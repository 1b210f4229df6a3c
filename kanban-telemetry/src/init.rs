//! Telemetry initialization and configuration

use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Output format of the log layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable lines with target and line numbers.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize console logging
///
/// Logs go to stderr. The filter comes from `RUST_LOG`, falling back to `info`. Only the first
/// call installs a subscriber; later calls are no-ops.
///
/// # Arguments
/// * `service_name` - Name recorded on the startup event
///
/// # Example
/// ```
/// use kanban_telemetry::init_telemetry;
/// init_telemetry("kanban-check");
/// ```
pub fn init_telemetry(service_name: &str) {
    init_with_format(service_name, LogFormat::Pretty, "info");
}

/// Initialize logging with JSON output, for CI logs that get machine-read.
pub fn init_json_telemetry(service_name: &str) {
    init_with_format(service_name, LogFormat::Json, "info");
}

/// Initialize logging with an explicit format and fallback filter directive.
pub fn init_with_format(service_name: &str, format: LogFormat, default_directive: &str) {
    INIT.call_once(|| {
        let registry = tracing_subscriber::registry().with(env_filter(default_directive));

        let installed = match format {
            LogFormat::Pretty => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_line_number(true),
                )
                .try_init(),
            LogFormat::Json => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_current_span(true),
                )
                .try_init(),
        };

        if installed.is_ok() {
            tracing::info!(service.name = service_name, ?format, "Telemetry initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_telemetry("kanban-telemetry-test");
        init_json_telemetry("kanban-telemetry-test");
        tracing::info!("still logging after repeated init");
    }

    #[test]
    fn test_default_format() {
        assert_eq!(LogFormat::default(), LogFormat::Pretty);
    }
}
