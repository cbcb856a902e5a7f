//! Main configuration type.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, LogFormat, LoggingConfig, PageConfig};

/// Log levels accepted in `logging.level` directives.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Checks one `level` or `target=level` filter directive.
fn is_valid_directive(directive: &str) -> bool {
    let level = match directive.rsplit_once('=') {
        Some((target, level)) => {
            if target.is_empty() || target.contains(char::is_whitespace) {
                return false;
            }
            level
        }
        None => directive,
    };
    LOG_LEVELS.contains(&level.to_lowercase().as_str())
}

/// Complete Lastline configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from
/// files and environment variables.
///
/// # Example
///
/// ```
/// use lastline_config::LastlineConfig;
///
/// let config = LastlineConfig::default();
/// assert!(config.page.show_trace);
/// assert_eq!(config.logging.level, "info");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct LastlineConfig {
    /// Failure page configuration.
    #[serde(default)]
    pub page: PageConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LastlineConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `logging.level` is not a
    /// comma-separated list of `level` or `target=level` directives.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut directives = self
            .logging
            .level
            .split(',')
            .map(str::trim)
            .filter(|directive| !directive.is_empty())
            .peekable();

        if directives.peek().is_none() {
            return Err(ConfigError::invalid_value("logging.level", "empty filter"));
        }
        if let Some(bad) = directives.find(|directive| !is_valid_directive(directive)) {
            return Err(ConfigError::invalid_value(
                "logging.level",
                format!("invalid filter directive: {bad}"),
            ));
        }

        Ok(())
    }

    /// Create a development configuration preset.
    ///
    /// Pretty debug-level logs; failure pages show the full trace.
    ///
    /// ```
    /// use lastline_config::{LastlineConfig, LogFormat};
    ///
    /// let config = LastlineConfig::development();
    /// assert_eq!(config.logging.format, LogFormat::Pretty);
    /// ```
    #[must_use]
    pub fn development() -> Self {
        Self {
            page: PageConfig::default(),
            logging: LoggingConfig {
                enabled: true,
                level: "debug".to_string(),
                format: LogFormat::Pretty,
            },
        }
    }

    /// Create a production configuration preset.
    ///
    /// JSON info-level logs. Pages omit the stack trace, and a panicking
    /// custom handler degrades to the default page.
    #[must_use]
    pub fn production() -> Self {
        Self {
            page: PageConfig {
                show_trace: false,
                guard_error_handler: true,
                ..PageConfig::default()
            },
            logging: LoggingConfig {
                enabled: true,
                level: "info".to_string(),
                format: LogFormat::Json,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lastline_core::EscapePolicy;

    #[test]
    fn test_default_is_valid() {
        assert!(LastlineConfig::default().validate().is_ok());
        assert!(LastlineConfig::development().validate().is_ok());
        assert!(LastlineConfig::production().validate().is_ok());
    }

    #[test]
    fn test_level_is_case_insensitive() {
        let mut config = LastlineConfig::default();
        config.logging.level = "WARN".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_level_rejected() {
        let mut config = LastlineConfig::default();
        config.logging.level = "loud".to_string();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "logging.level"));
    }

    #[test]
    fn test_target_directives_accepted() {
        let mut config = LastlineConfig::default();
        config.logging.level = "lastline_middleware=debug, warn".to_string();
        assert!(config.validate().is_ok());

        config.logging.level = "hyper=off,info".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_directives_rejected() {
        for level in ["", " , ", "=debug", "lastline=loud", "my target=info"] {
            let mut config = LastlineConfig::default();
            config.logging.level = level.to_string();
            assert!(config.validate().is_err(), "{level:?} should be rejected");
        }
    }

    #[test]
    fn test_presets() {
        let dev = LastlineConfig::development();
        assert_eq!(dev.logging.level, "debug");
        assert!(dev.page.show_trace);

        let prod = LastlineConfig::production();
        assert_eq!(prod.logging.format, LogFormat::Json);
        assert!(!prod.page.show_trace);
        assert!(prod.page.guard_error_handler);
        assert_eq!(prod.page.escape_policy, EscapePolicy::Strict);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = LastlineConfig::production();
        let text = toml::to_string(&config).unwrap();
        let parsed: LastlineConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result: Result<LastlineConfig, _> = toml::from_str("[server]\nport = 80\n");
        assert!(result.is_err());
    }
}
