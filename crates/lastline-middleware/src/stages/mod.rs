//! Pipeline stages.
//!
//! - [`exception`] - Converts downstream failures into responses

pub mod exception;

pub use exception::{ErrorHandler, ExceptionMiddleware};
