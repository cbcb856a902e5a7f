//! Structured logging for Lastline.
//!
//! The error boundary reports what it does through `tracing` events:
//!
//! | Event | Level | Fields |
//! |-------|-------|--------|
//! | failure caught | `debug` | `request_id`, `failure_type`, `failure_code` |
//! | failure page rendered | `debug` | `request_id`, `failure_type`, `failure_code`, `status` |
//! | custom handler override | `debug` | `request_id`, `status` |
//! | panic converted | `warn` | `request_id`, `panic` |
//! | fallback response | `error` | `request_id`, `error` |
//!
//! This crate installs a subscriber for them. Hosts that already install
//! their own subscriber do not need it.
//!
//! # Example
//!
//! ```no_run
//! use lastline_telemetry::{init_logging, LogConfig};
//!
//! # fn main() -> lastline_telemetry::TelemetryResult<()> {
//! init_logging(&LogConfig::development())?;
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/lastline-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, fields, init_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
