//! # Lastline Core
//!
//! Core types for the Lastline error boundary.
//!
//! This crate provides the data model shared by the middleware, configuration
//! and test crates:
//!
//! - [`Failure`] - An unhandled failure raised while processing a request
//! - [`Frame`] / [`StackTrace`] - Structured or textual call stacks
//! - [`StatusOutcome`] - Resolved HTTP status code and reason phrase
//! - [`EscapePolicy`] - How dynamic values are inserted into rendered pages
//! - [`RequestId`] - UUID v7 request identifier
//! - [`LastlineError`] - Standard error type

#![doc(html_root_url = "https://docs.rs/lastline-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
mod error;
mod failure;
mod policy;
pub mod status;
pub mod trace;

pub use context::RequestId;
pub use error::{LastlineError, LastlineResult};
pub use failure::{Failure, Location};
pub use policy::EscapePolicy;
pub use status::{resolve_status, StatusOutcome};
pub use trace::{Frame, StackTrace, TraceLine};
