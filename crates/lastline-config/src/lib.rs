//! Typed configuration for Lastline.
//!
//! This crate provides a strongly-typed configuration for the error boundary
//! with support for:
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Overview
//!
//! [`LastlineConfig`] has two sections:
//!
//! - [`PageConfig`] - How failure pages are rendered and guarded
//! - [`LoggingConfig`] - Log level and output format
//!
//! # Configuration File Format
//!
//! ```toml
//! [page]
//! escape_policy = "strict"
//! show_trace = true
//! guard_error_handler = false
//! catch_panics = true
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Every value can be overridden with `PREFIX__SECTION__KEY`, for example:
//!
//! - `LASTLINE__PAGE__SHOW_TRACE=false`
//! - `LASTLINE__LOGGING__LEVEL=debug`

#![doc(html_root_url = "https://docs.rs/lastline-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::LastlineConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{LogFormat, LoggingConfig, PageConfig};
