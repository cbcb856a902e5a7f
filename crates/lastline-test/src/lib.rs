//! # Lastline Test
//!
//! Test utilities for the Lastline error boundary. Requests run through a
//! real [`Pipeline`](lastline_middleware::Pipeline) in memory, and responses
//! are collected into a [`TestResponse`] with assertion helpers.
//!
//! ## Example
//!
//! ```
//! use lastline_test::{fixtures, TestClient};
//!
//! # tokio_test::block_on(async {
//! let client = TestClient::default();
//! let response = client
//!     .send(fixtures::request("/"), fixtures::fail(fixtures::script_message()))
//!     .await
//!     .unwrap();
//!
//! response
//!     .assert_status(http::StatusCode::INTERNAL_SERVER_ERROR)
//!     .assert_failure_page()
//!     .assert_body_lacks("<script>");
//! # });
//! ```

#![doc(html_root_url = "https://docs.rs/lastline-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod error;
pub mod fixtures;
mod response;

pub use client::TestClient;
pub use error::TestError;
pub use response::TestResponse;
