//! # Lastline
//!
//! **An HTTP error boundary that renders unhandled failures as diagnostic pages**
//!
//! Lastline wraps a request handler, passes successful responses through
//! untouched, and turns every failure raised downstream (an `Err(Failure)` or
//! a panic) into exactly one response:
//!
//! - a custom override from an injected [`ErrorHandler`], or
//! - an HTML page showing the message, origin, and call stack, with the
//!   status resolved from the failure code.
//!
//! ## Quick Start
//!
//! ```
//! use lastline::prelude::*;
//!
//! # fn main() -> Result<(), lastline::SetupError> {
//! let config = ConfigLoader::new().with_env_prefix("LASTLINE").load()?;
//! let pipeline = Pipeline::builder()
//!     .exception(lastline::exception_middleware(&config))
//!     .build();
//!
//! assert_eq!(pipeline.stage_names(), vec!["exception"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Request → Exception → stages... → Handler
//!               ↓
//! Response ← (Ok passthrough | override | failure page)
//! ```

#![doc(html_root_url = "https://docs.rs/lastline/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use lastline_core as core;

// Re-export middleware types
pub use lastline_middleware as middleware;

// Re-export configuration types
pub use lastline_config as config;

// Re-export telemetry types
pub use lastline_telemetry as telemetry;

pub use lastline_core::{EscapePolicy, Failure, StatusOutcome};
pub use lastline_middleware::{ErrorHandler, ExceptionMiddleware, Pipeline};

use lastline_config::{ConfigError, LastlineConfig};
use lastline_telemetry::{LogConfig, TelemetryError};
use thiserror::Error;

/// Errors raised while setting up the error boundary.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}

/// Builds an exception stage from the `[page]` section of `config`.
#[must_use]
pub fn exception_middleware(config: &LastlineConfig) -> ExceptionMiddleware {
    ExceptionMiddleware::from_config(&config.page)
}

/// Installs the global log subscriber described by the `[logging]` section.
///
/// # Errors
///
/// Returns `SetupError::Telemetry` if the level is not a valid filter or a
/// subscriber is already installed.
pub fn init_logging(config: &LastlineConfig) -> Result<(), SetupError> {
    lastline_telemetry::init_logging(&LogConfig::from(&config.logging))?;
    Ok(())
}

/// Prelude module for convenient imports.
///
/// ```
/// use lastline::prelude::*;
/// ```
pub mod prelude {
    pub use lastline_core::{EscapePolicy, Failure, Frame, Location, RequestId, StackTrace};

    pub use lastline_middleware::{
        BoxFuture, ErrorHandler, ExceptionMiddleware, HandlerResult, Middleware,
        MiddlewareContext, Next, Pipeline, RenderOptions, Request, Response, ResponseExt,
    };

    pub use lastline_config::{ConfigLoader, LastlineConfig, PageConfig};
}
