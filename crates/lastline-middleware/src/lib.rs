//! # Lastline Middleware
//!
//! An HTTP error boundary: middleware that turns unhandled failures raised
//! downstream into HTML diagnostic pages.
//!
//! ## Flow
//!
//! ```text
//! Request → Exception → stages... → Handler
//!               ↓
//!   Ok(response)   → returned unchanged
//!   Err(failure)   → custom handler override, or rendered failure page
//!   panic          → converted to a failure, then as above
//! ```
//!
//! Downstream code reports failures as `Err(Failure)` through
//! [`HandlerResult`]. The [`ExceptionMiddleware`] is the single place that
//! translates them into responses:
//!
//! | Outcome | Response |
//! |---------|----------|
//! | `Ok(r)` | `r`, untouched |
//! | custom handler returns `Some(r)` | `r`, untouched |
//! | otherwise | status resolved from the failure code, HTML page, `Content-Type: text/html; charset=utf-8`, `Cache-Control: no-cache` |
//!
//! ## Example
//!
//! ```
//! use lastline_core::Failure;
//! use lastline_middleware::{ExceptionMiddleware, MiddlewareContext, Next, Request};
//! use bytes::Bytes;
//! use http_body_util::Full;
//!
//! # tokio_test::block_on(async {
//! let exception = ExceptionMiddleware::new();
//! let mut ctx = MiddlewareContext::new();
//! let request: Request = http::Request::new(Full::new(Bytes::new()));
//!
//! let next = Next::handler(|_ctx, _req| {
//!     Box::pin(async { Err(Failure::new("AccessDenied", "Forbidden").with_code(403)) })
//! });
//!
//! let response = exception.run(&mut ctx, request, next).await;
//! assert_eq!(response.status(), 403);
//! assert_eq!(response.headers()["cache-control"], "no-cache");
//! # });
//! ```

#![doc(html_root_url = "https://docs.rs/lastline-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod context;
pub mod factory;
pub mod middleware;
pub mod pipeline;
pub mod render;
pub mod stages;
pub mod types;

// Re-export main types at crate root
pub use context::MiddlewareContext;
pub use factory::{HttpFactory, ResponseFactory, StreamFactory};
pub use middleware::{BoxFuture, Middleware, Next};
pub use pipeline::{BoxedMiddleware, Pipeline, PipelineBuilder};
pub use render::{render_page, RenderOptions, RenderedPage};
pub use stages::{ErrorHandler, ExceptionMiddleware};
pub use types::{HandlerResult, Request, Response, ResponseExt};
