//! Structured logging setup.
//!
//! Installs a `tracing-subscriber` registry with an [`EnvFilter`] and either
//! a JSON or a pretty formatter.

use crate::error::TelemetryError;
use crate::TelemetryResult;
use lastline_config::{LogFormat, LoggingConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Whether logging is enabled.
    pub enabled: bool,

    /// Filter directive (e.g., "info", "lastline_middleware=debug,warn").
    pub level: String,

    /// Whether to output JSON format.
    pub json_format: bool,

    /// Whether to include file/line info.
    pub file_line_info: bool,

    /// Whether to include target (module path).
    pub include_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            json_format: true,
            file_line_info: false,
            include_target: true,
        }
    }
}

impl LogConfig {
    /// Creates a development configuration with human-readable output.
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            json_format: false,
            file_line_info: true,
            ..Self::default()
        }
    }

    /// Creates a production configuration with JSON output.
    #[must_use]
    pub fn production() -> Self {
        Self::default()
    }
}

impl From<&LoggingConfig> for LogConfig {
    fn from(config: &LoggingConfig) -> Self {
        Self {
            enabled: config.enabled,
            level: config.level.clone(),
            json_format: config.format == LogFormat::Json,
            file_line_info: config.format == LogFormat::Pretty,
            include_target: true,
        }
    }
}

/// Initializes the global logging subscriber.
///
/// Does nothing when `config.enabled` is false.
///
/// # Errors
///
/// Returns `TelemetryError::InvalidFilter` if the level is not a valid
/// filter directive, or `TelemetryError::LoggingInit` if a global subscriber
/// is already installed.
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let filter = create_env_filter(&config.level)?;

    if config.json_format {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_file(config.file_line_info)
            .with_line_number(config.file_line_info)
            .with_target(config.include_target)
            .with_filter(filter);

        tracing_subscriber::registry()
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .pretty()
            .with_file(config.file_line_info)
            .with_line_number(config.file_line_info)
            .with_target(config.include_target)
            .with_filter(filter);

        tracing_subscriber::registry()
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    }

    Ok(())
}

/// Creates an env filter from a directive string.
///
/// # Errors
///
/// Returns `TelemetryError::InvalidFilter` if the directive is invalid.
pub fn create_env_filter(filter: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_new(filter).map_err(|e| TelemetryError::InvalidFilter(format!("{filter}: {e}")))
}

/// Field names used by the error boundary's log events.
pub mod fields {
    /// Request ID field name.
    pub const REQUEST_ID: &str = "request_id";

    /// Failure type name field name.
    pub const FAILURE_TYPE: &str = "failure_type";

    /// Failure code field name.
    pub const FAILURE_CODE: &str = "failure_code";

    /// Resolved HTTP status field name.
    pub const STATUS: &str = "status";

    /// Panic message field name.
    pub const PANIC: &str = "panic";

    /// Error field name.
    pub const ERROR: &str = "error";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert!(config.enabled);
        assert!(config.json_format);
        assert_eq!(config.level, "info");
        assert_eq!(LogConfig::production(), config);
    }

    #[test]
    fn test_development_config() {
        let config = LogConfig::development();
        assert!(!config.json_format);
        assert!(config.file_line_info);
        assert_eq!(config.level, "debug");
    }

    #[test]
    fn test_from_logging_config() {
        let config = LogConfig::from(&LoggingConfig {
            enabled: false,
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        });

        assert!(!config.enabled);
        assert_eq!(config.level, "warn");
        assert!(!config.json_format);
        assert!(config.file_line_info);
    }

    #[test]
    fn test_field_names() {
        assert_eq!(fields::REQUEST_ID, "request_id");
        assert_eq!(fields::FAILURE_TYPE, "failure_type");
        assert_eq!(fields::STATUS, "status");
    }

    #[test]
    fn test_create_env_filter_valid() {
        assert!(create_env_filter("info").is_ok());
        assert!(create_env_filter("lastline_middleware=debug,warn").is_ok());
    }

    #[test]
    fn test_configured_directive_builds_filter() {
        let mut config = lastline_config::LastlineConfig::default();
        config.logging.level = "lastline_middleware=debug,warn".to_string();
        assert!(config.validate().is_ok());

        let log_config = LogConfig::from(&config.logging);
        assert!(create_env_filter(&log_config.level).is_ok());
    }

    #[test]
    fn test_disabled_logging() {
        let config = LogConfig {
            enabled: false,
            ..Default::default()
        };

        assert!(init_logging(&config).is_ok());
    }
}
