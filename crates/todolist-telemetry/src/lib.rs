//! # Todolist Telemetry
//!
//! Structured logging for the todo list service, built on `tracing`.
//!
//! Human-readable output is the default; JSON lines can be switched on for
//! log shippers. `RUST_LOG` always wins over the configured level.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod logging;

pub use logging::{build_filter, init_logging};

/// Configuration for logging.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to the startup event.
    pub service_name: String,
    /// Log level or filter directive.
    pub log_level: String,
    /// Enable JSON logging.
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self::new("todolist")
    }
}

impl TelemetryConfig {
    /// Creates a new telemetry configuration.
    #[must_use]
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }

    /// Sets the log level.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enables JSON logging.
    #[must_use]
    pub fn with_json_logs(mut self) -> Self {
        self.json_logs = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = TelemetryConfig::new("svc")
            .with_log_level("debug")
            .with_json_logs();

        assert_eq!(config.service_name, "svc");
        assert_eq!(config.log_level, "debug");
        assert!(config.json_logs);
    }

    #[test]
    fn test_config_default() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "todolist");
        assert_eq!(config.log_level, "info");
        assert!(!config.json_logs);
    }
}
