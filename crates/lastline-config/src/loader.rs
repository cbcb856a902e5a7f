//! Configuration loader with layered approach.
//!
//! This module provides the [`ConfigLoader`] for loading configuration from
//! multiple sources: defaults, files, and environment variables.

use std::env;
use std::fs;
use std::path::Path;

use lastline_core::EscapePolicy;

use crate::{ConfigError, LastlineConfig, LogFormat};

/// Configuration loader with layered approach.
///
/// The loader applies configuration in layers, with later layers overriding
/// earlier ones:
/// 1. Default values (built into the code)
/// 2. Configuration file or string (TOML or JSON)
/// 3. Environment variables
///
/// # Example
///
/// ```no_run
/// use lastline_config::ConfigLoader;
///
/// # fn main() -> Result<(), lastline_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_defaults()
///     .with_file("lastline.toml")?
///     .with_env_prefix("LASTLINE")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: LastlineConfig,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader starting from defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: LastlineConfig::default(),
            env_prefix: None,
        }
    }

    /// Start with default configuration values.
    ///
    /// This is what `new()` starts from, but can be chained for clarity.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.config = LastlineConfig::default();
        self
    }

    /// Start with the development preset.
    ///
    /// ```
    /// use lastline_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new().with_development().load().unwrap();
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = LastlineConfig::development();
        self
    }

    /// Start with the production preset.
    #[must_use]
    pub fn with_production(mut self) -> Self {
        self.config = LastlineConfig::production();
        self
    }

    /// Load configuration from a file.
    ///
    /// The format is determined by the extension (`.toml` or `.json`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The file does not exist
    /// - The file cannot be read
    /// - The file contains invalid TOML/JSON
    /// - The file contains unknown fields
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        self.config = Self::parse(&content, &extension)?;
        Ok(self)
    }

    /// Load configuration from a file if it exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from a string in the given format (`toml` or `json`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the format is unsupported or parsing fails.
    ///
    /// # Example
    ///
    /// ```
    /// use lastline_config::ConfigLoader;
    /// use lastline_core::EscapePolicy;
    ///
    /// let toml = r#"
    ///     [page]
    ///     escape_policy = "legacy"
    /// "#;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(toml, "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.page.escape_policy, EscapePolicy::Legacy);
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = Self::parse(content, &format.to_lowercase())?;
        Ok(self)
    }

    /// Set environment variable prefix for overrides.
    ///
    /// Environment variables use the format `PREFIX__SECTION__KEY`, for
    /// example `LASTLINE__PAGE__SHOW_TRACE=false`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Finalize and return the loaded configuration.
    ///
    /// Applies environment variable overrides (if a prefix was set) and
    /// validates the final configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an override cannot be parsed or validation
    /// fails.
    pub fn load(mut self) -> Result<LastlineConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_overrides(&prefix, env::vars())?;
        }

        self.config.validate()?;
        Ok(self.config)
    }

    /// Finalize without applying overrides or validating.
    #[must_use]
    pub fn load_unvalidated(self) -> LastlineConfig {
        self.config
    }

    fn parse(content: &str, format: &str) -> Result<LastlineConfig, ConfigError> {
        match format {
            "toml" => Ok(toml::from_str(content)?),
            "json" => Ok(serde_json::from_str(content)?),
            other => Err(ConfigError::unsupported_format(other)),
        }
    }

    // Apply every `PREFIX__...` variable from `vars`
    fn apply_overrides<I>(&mut self, prefix: &str, vars: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let head = format!("{prefix}__");
        for (key, value) in vars {
            if let Some(rest) = key.strip_prefix(&head) {
                self.apply_env_var(&key, rest, &value)?;
            }
        }
        Ok(())
    }

    fn apply_env_var(&mut self, key: &str, path: &str, value: &str) -> Result<(), ConfigError> {
        let parts: Vec<&str> = path.split("__").collect();

        match parts.as_slice() {
            // Page section
            ["PAGE", "ESCAPE_POLICY"] => {
                self.config.page.escape_policy = match value.to_lowercase().as_str() {
                    "strict" => EscapePolicy::Strict,
                    "legacy" => EscapePolicy::Legacy,
                    _ => {
                        return Err(ConfigError::env_parse_error(
                            key,
                            "expected 'strict' or 'legacy'",
                        ))
                    }
                };
            }
            ["PAGE", "SHOW_TRACE"] => {
                self.config.page.show_trace = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["PAGE", "GUARD_ERROR_HANDLER"] => {
                self.config.page.guard_error_handler = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["PAGE", "CATCH_PANICS"] => {
                self.config.page.catch_panics = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }

            // Logging section
            ["LOGGING", "ENABLED"] => {
                self.config.logging.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["LOGGING", "LEVEL"] => {
                self.config.logging.level = value.to_string();
            }
            ["LOGGING", "FORMAT"] => {
                self.config.logging.format = match value.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    "pretty" => LogFormat::Pretty,
                    _ => {
                        return Err(ConfigError::env_parse_error(
                            key,
                            "expected 'json' or 'pretty'",
                        ))
                    }
                };
            }

            // Unknown key - ignore
            _ => {}
        }

        Ok(())
    }
}

/// Parse a boolean from a string.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
