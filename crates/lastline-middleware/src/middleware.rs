//! Core middleware trait and types.
//!
//! This module defines the [`Middleware`] trait that pipeline stages implement.
//! Unlike a plain `Request -> Response` chain, every stage and the terminal
//! handler return a [`HandlerResult`]: an unhandled failure travels back up
//! the chain as `Err(Failure)` until the exception stage turns it into a
//! response.
//!
//! # Example
//!
//! ```
//! use lastline_middleware::{BoxFuture, HandlerResult, Middleware, Next, Request};
//! use lastline_middleware::context::MiddlewareContext;
//!
//! struct Timing;
//!
//! impl Middleware for Timing {
//!     fn name(&self) -> &'static str {
//!         "timing"
//!     }
//!
//!     fn process<'a>(
//!         &'a self,
//!         ctx: &'a mut MiddlewareContext,
//!         request: Request,
//!         next: Next<'a>,
//!     ) -> BoxFuture<'a, HandlerResult> {
//!         Box::pin(async move {
//!             let result = next.run(ctx, request).await;
//!             tracing::debug!(elapsed_ms = ctx.elapsed().as_millis() as u64, "done");
//!             result
//!         })
//!     }
//! }
//! ```

use crate::context::MiddlewareContext;
use crate::types::{HandlerResult, Request};
use std::future::Future;
use std::pin::Pin;

/// A boxed future that returns a response.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The core middleware trait.
///
/// Middleware receives a mutable context, the incoming request, and a [`Next`]
/// callback to invoke the rest of the chain.
///
/// # Invariants
///
/// - Middleware MUST call `next.run()` at most once
/// - Middleware SHOULD propagate `Err(Failure)` from downstream unchanged
///   unless it is the exception stage
pub trait Middleware: Send + Sync + 'static {
    /// Returns the unique name of this middleware stage.
    ///
    /// This name is used for logging and debugging.
    fn name(&self) -> &'static str;

    /// Process the request through this middleware.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The mutable middleware context
    /// * `request` - The incoming HTTP request
    /// * `next` - Callback to invoke the next middleware
    fn process<'a>(
        &'a self,
        ctx: &'a mut MiddlewareContext,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, HandlerResult>;
}

/// The terminal handler of a chain.
type HandlerFn<'a> =
    Box<dyn FnOnce(&mut MiddlewareContext, Request) -> BoxFuture<'static, HandlerResult> + Send + 'a>;

/// Callback to invoke the next middleware in the chain.
///
/// `run` consumes `self`, so the rest of the chain can be invoked at most
/// once.
pub struct Next<'a> {
    inner: NextInner<'a>,
}

enum NextInner<'a> {
    /// More middleware to process
    Chain {
        middleware: &'a dyn Middleware,
        next: Box<Next<'a>>,
    },
    /// End of chain - invoke the handler
    Handler(HandlerFn<'a>),
}

impl<'a> Next<'a> {
    /// Creates a `Next` that will invoke the given middleware.
    pub(crate) fn new(middleware: &'a dyn Middleware, next: Next<'a>) -> Self {
        Self {
            inner: NextInner::Chain {
                middleware,
                next: Box::new(next),
            },
        }
    }

    /// Creates a terminal `Next` that invokes the handler.
    ///
    /// This is how a host wires its own request handler (the downstream
    /// continuation) into a middleware.
    pub fn handler<F>(f: F) -> Self
    where
        F: FnOnce(&mut MiddlewareContext, Request) -> BoxFuture<'static, HandlerResult> + Send + 'a,
    {
        Self {
            inner: NextInner::Handler(Box::new(f)),
        }
    }

    /// Invokes the next middleware or handler in the chain.
    pub async fn run(self, ctx: &mut MiddlewareContext, request: Request) -> HandlerResult {
        match self.inner {
            NextInner::Chain { middleware, next } => middleware.process(ctx, request, *next).await,
            NextInner::Handler(handler) => handler(ctx, request).await,
        }
    }
}
