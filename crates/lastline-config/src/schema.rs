//! Configuration section types.

use lastline_core::EscapePolicy;
use serde::{Deserialize, Serialize};

/// Failure page configuration.
///
/// Controls how the exception stage renders and guards failures. The custom
/// error handler is not part of this section; it is injected in code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PageConfig {
    /// Which interpolated fields are HTML-escaped.
    #[serde(default)]
    pub escape_policy: EscapePolicy,

    /// Include the stack trace section in rendered pages.
    #[serde(default = "default_true")]
    pub show_trace: bool,

    /// Catch panics raised by the custom error handler and fall back to the
    /// default page.
    #[serde(default)]
    pub guard_error_handler: bool,

    /// Convert panics raised downstream into failures.
    #[serde(default = "default_true")]
    pub catch_panics: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            escape_policy: EscapePolicy::default(),
            show_trace: true,
            guard_error_handler: false,
            catch_panics: true,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log filter: a level (trace, debug, info, warn, error, off) or
    /// comma-separated `target=level` directives.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
