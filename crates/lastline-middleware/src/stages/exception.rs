//! Exception stage.
//!
//! The error boundary of the pipeline. It runs the rest of the chain, passes
//! successful responses through untouched, and converts every failure into
//! exactly one response: either the override returned by a custom
//! [`ErrorHandler`], or a rendered HTML failure page.
//!
//! # Pipeline Position
//!
//! The exception stage is always the outermost stage:
//!
//! ```text
//! Request → [Exception] → stages... → Handler
//!                ↓
//! Response ← (Ok passthrough | override | failure page)
//! ```
//!
//! # Example
//!
//! ```
//! use lastline_core::{EscapePolicy, Failure};
//! use lastline_middleware::context::MiddlewareContext;
//! use lastline_middleware::stages::ExceptionMiddleware;
//!
//! let exception = ExceptionMiddleware::new()
//!     .escape_policy(EscapePolicy::Strict)
//!     .show_trace(false);
//!
//! let ctx = MiddlewareContext::new();
//! let failure = Failure::new("NotFound", "No such page").with_code(404);
//! let response = exception.handle_failure(&ctx, &failure);
//!
//! assert_eq!(response.status(), 404);
//! ```

use crate::{
    context::MiddlewareContext,
    factory::{HttpFactory, ResponseFactory, StreamFactory},
    middleware::{BoxFuture, Middleware, Next},
    render::{render_page, RenderOptions, RenderedPage},
    types::{HandlerResult, Request, Response},
};
use bytes::Bytes;
use futures_util::FutureExt;
use http::header::{CACHE_CONTROL, CONTENT_TYPE};
use http::{HeaderValue, StatusCode};
use http_body_util::Full;
use lastline_config::PageConfig;
use lastline_core::{EscapePolicy, Failure, LastlineResult};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Content type of rendered failure pages.
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Cache directive attached to rendered failure pages.
pub const NO_CACHE: &str = "no-cache";

/// A custom failure handler.
///
/// Returning `Some(response)` overrides the default page unconditionally;
/// the response is sent exactly as returned. Returning `None` falls back to
/// the default page.
///
/// Any `Fn(&Failure) -> Option<Response>` closure is an `ErrorHandler`.
pub trait ErrorHandler: Send + Sync + 'static {
    /// Produces an override response for `failure`, or declines.
    fn handle(&self, failure: &Failure) -> Option<Response>;
}

impl<F> ErrorHandler for F
where
    F: Fn(&Failure) -> Option<Response> + Send + Sync + 'static,
{
    fn handle(&self, failure: &Failure) -> Option<Response> {
        self(failure)
    }
}

/// Middleware that converts downstream failures into responses.
#[derive(Clone)]
pub struct ExceptionMiddleware {
    error_handler: Option<Arc<dyn ErrorHandler>>,
    options: RenderOptions,
    catch_panics: bool,
    guard_error_handler: bool,
    response_factory: Arc<dyn ResponseFactory>,
    stream_factory: Arc<dyn StreamFactory>,
}

impl Default for ExceptionMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ExceptionMiddleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExceptionMiddleware")
            .field("has_error_handler", &self.error_handler.is_some())
            .field("options", &self.options)
            .field("catch_panics", &self.catch_panics)
            .field("guard_error_handler", &self.guard_error_handler)
            .finish_non_exhaustive()
    }
}

impl ExceptionMiddleware {
    /// Creates an exception stage with no custom handler, strict escaping,
    /// visible traces, and panic capture enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            error_handler: None,
            options: RenderOptions::default(),
            catch_panics: true,
            guard_error_handler: false,
            response_factory: Arc::new(HttpFactory),
            stream_factory: Arc::new(HttpFactory),
        }
    }

    /// Creates an exception stage from the `[page]` configuration section.
    ///
    /// The custom handler is never read from configuration; set it with
    /// [`error_handler`](Self::error_handler).
    #[must_use]
    pub fn from_config(config: &PageConfig) -> Self {
        Self::new()
            .escape_policy(config.escape_policy)
            .show_trace(config.show_trace)
            .catch_panics(config.catch_panics)
            .guard_error_handler(config.guard_error_handler)
    }

    /// Sets the custom failure handler.
    #[must_use]
    pub fn error_handler<H: ErrorHandler>(mut self, handler: H) -> Self {
        self.error_handler = Some(Arc::new(handler));
        self
    }

    /// Sets the escaping policy used for rendered pages.
    #[must_use]
    pub fn escape_policy(mut self, policy: EscapePolicy) -> Self {
        self.options.escape_policy = policy;
        self
    }

    /// Sets whether rendered pages include the stack trace section.
    #[must_use]
    pub fn show_trace(mut self, show: bool) -> Self {
        self.options.show_trace = show;
        self
    }

    /// Sets whether downstream panics are converted into failures.
    ///
    /// When disabled, a panic unwinds through this stage.
    #[must_use]
    pub fn catch_panics(mut self, enabled: bool) -> Self {
        self.catch_panics = enabled;
        self
    }

    /// Sets whether a panicking custom handler degrades to the default page.
    ///
    /// When disabled (the default), the panic propagates to the caller.
    #[must_use]
    pub fn guard_error_handler(mut self, enabled: bool) -> Self {
        self.guard_error_handler = enabled;
        self
    }

    /// Replaces the factory used to start failure responses.
    #[must_use]
    pub fn response_factory<F: ResponseFactory>(mut self, factory: F) -> Self {
        self.response_factory = Arc::new(factory);
        self
    }

    /// Replaces the factory used to create failure page bodies.
    #[must_use]
    pub fn stream_factory<F: StreamFactory>(mut self, factory: F) -> Self {
        self.stream_factory = Arc::new(factory);
        self
    }

    /// Returns the render options.
    #[must_use]
    pub fn render_options(&self) -> &RenderOptions {
        &self.options
    }

    /// Runs `next` and converts its outcome into a response.
    ///
    /// This never fails: the result is `next`'s own response, a custom
    /// override, a rendered failure page, or a plain 500 fallback.
    pub async fn run(
        &self,
        ctx: &mut MiddlewareContext,
        request: Request,
        next: Next<'_>,
    ) -> Response {
        let result = if self.catch_panics {
            match AssertUnwindSafe(next.run(ctx, request)).catch_unwind().await {
                Ok(result) => result,
                Err(payload) => {
                    let failure = Failure::from_panic(payload.as_ref());
                    warn!(
                        request_id = %ctx.request_id(),
                        panic = failure.message(),
                        "Converted downstream panic into failure"
                    );
                    Err(failure)
                }
            }
        } else {
            next.run(ctx, request).await
        };

        self.intercept(ctx, result)
    }

    /// Converts a downstream outcome into a response.
    ///
    /// `Ok` responses are returned unmodified.
    pub fn intercept(&self, ctx: &MiddlewareContext, result: HandlerResult) -> Response {
        match result {
            Ok(response) => response,
            Err(failure) => self.handle_failure(ctx, &failure),
        }
    }

    /// Builds the response for a failure.
    pub fn handle_failure(&self, ctx: &MiddlewareContext, failure: &Failure) -> Response {
        debug!(
            request_id = %ctx.request_id(),
            failure_type = failure.type_name(),
            failure_code = failure.code(),
            "Caught unhandled failure"
        );

        if let Some(response) = self.run_error_handler(ctx, failure) {
            debug!(
                request_id = %ctx.request_id(),
                status = response.status().as_u16(),
                "Error handler override applied"
            );
            return response;
        }

        let page = render_page(failure, &self.options);
        let outcome = page.outcome();

        match self.page_response(page) {
            Ok(response) => {
                debug!(
                    request_id = %ctx.request_id(),
                    failure_type = failure.type_name(),
                    failure_code = failure.code(),
                    status = outcome.code(),
                    "Rendered failure page"
                );
                response
            }
            Err(err) => {
                error!(
                    request_id = %ctx.request_id(),
                    error = %err,
                    "Failed to build failure page response, sending fallback"
                );
                fallback_response()
            }
        }
    }

    fn run_error_handler(&self, ctx: &MiddlewareContext, failure: &Failure) -> Option<Response> {
        let handler = self.error_handler.as_ref()?;

        if !self.guard_error_handler {
            return handler.handle(failure);
        }

        match panic::catch_unwind(AssertUnwindSafe(|| handler.handle(failure))) {
            Ok(response) => response,
            Err(payload) => {
                let panic = Failure::from_panic(payload.as_ref());
                warn!(
                    request_id = %ctx.request_id(),
                    panic = panic.message(),
                    "Error handler panicked, rendering default page"
                );
                None
            }
        }
    }

    fn page_response(&self, page: RenderedPage) -> LastlineResult<Response> {
        let outcome = page.outcome();
        let response = self
            .response_factory
            .create_response(outcome.status(), outcome.reason_phrase())?
            .header(CONTENT_TYPE, HTML_CONTENT_TYPE)
            .header(CACHE_CONTROL, NO_CACHE)
            .body(self.stream_factory.create_stream(page.into_html()))?;

        Ok(response)
    }
}

/// A plain 500 response assembled from static parts.
fn fallback_response() -> Response {
    let mut response = http::Response::new(Full::new(Bytes::from_static(b"Internal Server Error")));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
    response
}

impl Middleware for ExceptionMiddleware {
    fn name(&self) -> &'static str {
        "exception"
    }

    fn process<'a>(
        &'a self,
        ctx: &'a mut MiddlewareContext,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, HandlerResult> {
        Box::pin(async move { Ok(self.run(ctx, request, next).await) })
    }
}
