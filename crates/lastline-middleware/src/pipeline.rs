//! Middleware pipeline with a fixed error boundary.
//!
//! A [`Pipeline`] is an ordered list of stages wrapped by a single
//! [`ExceptionMiddleware`]. The exception stage is always outermost, so a
//! pipeline as a whole maps every request to exactly one response:
//!
//! ```text
//! Request → Exception → stage 1 → ... → stage N → Handler
//! ```
//!
//! Stages added with [`PipelineBuilder::add_stage`] run in insertion order.

use crate::context::MiddlewareContext;
use crate::middleware::{BoxFuture, Middleware, Next};
use crate::stages::ExceptionMiddleware;
use crate::types::{HandlerResult, Request, Response};
use std::sync::Arc;

/// A type-erased middleware that can be stored in a vector.
pub type BoxedMiddleware = Arc<dyn Middleware>;

/// A middleware pipeline whose outermost stage is the exception stage.
///
/// The pipeline cannot be modified after construction.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use http_body_util::Full;
/// use lastline_core::Failure;
/// use lastline_middleware::context::MiddlewareContext;
/// use lastline_middleware::pipeline::Pipeline;
///
/// # tokio_test::block_on(async {
/// let pipeline = Pipeline::builder().build();
/// let request = http::Request::new(Full::new(Bytes::new()));
///
/// let response = pipeline
///     .process(MiddlewareContext::new(), request, |_ctx, _req| {
///         Box::pin(async { Err(Failure::new("NotFound", "missing").with_code(404)) })
///     })
///     .await;
///
/// assert_eq!(response.status(), 404);
/// # });
/// ```
pub struct Pipeline {
    /// The error boundary.
    exception: ExceptionMiddleware,

    /// Inner stages, outermost first.
    stages: Vec<BoxedMiddleware>,
}

impl Pipeline {
    /// Creates a new pipeline builder.
    #[must_use]
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Processes a request through the pipeline.
    ///
    /// The request flows through the exception stage and every inner stage
    /// to the handler. Failures and panics from any of them come back as the
    /// exception stage's response.
    pub async fn process<H>(&self, mut ctx: MiddlewareContext, request: Request, handler: H) -> Response
    where
        H: FnOnce(&mut MiddlewareContext, Request) -> BoxFuture<'static, HandlerResult> + Send + 'static,
    {
        let next = self.build_chain(handler);
        self.exception.run(&mut ctx, request, next).await
    }

    /// Builds the chain of inner stages ending in the handler.
    fn build_chain<'a, H>(&'a self, handler: H) -> Next<'a>
    where
        H: FnOnce(&mut MiddlewareContext, Request) -> BoxFuture<'static, HandlerResult> + Send + 'a,
    {
        let mut next = Next::handler(handler);

        for middleware in self.stages.iter().rev() {
            next = Next::new(middleware.as_ref(), next);
        }

        next
    }

    /// Returns the exception stage.
    #[must_use]
    pub fn exception(&self) -> &ExceptionMiddleware {
        &self.exception
    }

    /// Returns the names of all stages in order, starting with `exception`.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&'static str> {
        std::iter::once(self.exception.name())
            .chain(self.stages.iter().map(|mw| mw.name()))
            .collect()
    }

    /// Returns the number of stages, including the exception stage.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len() + 1
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("exception", &self.exception)
            .field("stages", &self.stage_names())
            .finish()
    }
}

/// Builder for constructing a [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    exception: Option<ExceptionMiddleware>,
    stages: Vec<BoxedMiddleware>,
}

impl PipelineBuilder {
    /// Creates a new builder with a default exception stage and no inner
    /// stages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the exception stage.
    #[must_use]
    pub fn exception(mut self, exception: ExceptionMiddleware) -> Self {
        self.exception = Some(exception);
        self
    }

    /// Appends an inner stage.
    ///
    /// Inner stages run after the exception stage, in the order they were
    /// added.
    #[must_use]
    pub fn add_stage<M: Middleware>(mut self, middleware: M) -> Self {
        self.stages.push(Arc::new(middleware));
        self
    }

    /// Builds the pipeline.
    #[must_use]
    pub fn build(self) -> Pipeline {
        Pipeline {
            exception: self.exception.unwrap_or_default(),
            stages: self.stages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::StatusCode;
    use http_body_util::Full;
    use lastline_core::Failure;
    use std::sync::Mutex;

    struct OrderTrackingMiddleware {
        name: &'static str,
        order: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Middleware for OrderTrackingMiddleware {
        fn name(&self) -> &'static str {
            self.name
        }

        fn process<'a>(
            &'a self,
            ctx: &'a mut MiddlewareContext,
            request: Request,
            next: Next<'a>,
        ) -> BoxFuture<'a, HandlerResult> {
            Box::pin(async move {
                self.order.lock().unwrap().push(self.name);
                next.run(ctx, request).await
            })
        }
    }

    /// A stage that fails instead of calling the rest of the chain.
    struct Reject;

    impl Middleware for Reject {
        fn name(&self) -> &'static str {
            "reject"
        }

        fn process<'a>(
            &'a self,
            _ctx: &'a mut MiddlewareContext,
            _request: Request,
            _next: Next<'a>,
        ) -> BoxFuture<'a, HandlerResult> {
            Box::pin(async { Err(Failure::new("Unauthorized", "no token").with_code(401)) })
        }
    }

    fn request() -> Request {
        http::Request::builder()
            .uri("/")
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_stages_run_in_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::builder()
            .add_stage(OrderTrackingMiddleware {
                name: "first",
                order: order.clone(),
            })
            .add_stage(OrderTrackingMiddleware {
                name: "second",
                order: order.clone(),
            })
            .build();

        let handler_order = order.clone();
        let response = pipeline
            .process(MiddlewareContext::new(), request(), move |_ctx, _req| {
                handler_order.lock().unwrap().push("handler");
                Box::pin(async {
                    Ok(http::Response::builder()
                        .status(StatusCode::NO_CONTENT)
                        .body(Full::new(Bytes::new()))
                        .unwrap())
                })
            })
            .await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "handler"]);
    }

    #[tokio::test]
    async fn test_stage_failure_is_caught() {
        let pipeline = Pipeline::builder().add_stage(Reject).build();

        let response = pipeline
            .process(MiddlewareContext::new(), request(), |_ctx, _req| {
                Box::pin(async {
                    Ok(http::Response::builder()
                        .status(StatusCode::OK)
                        .body(Full::new(Bytes::new()))
                        .unwrap())
                })
            })
            .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_stage_names() {
        let pipeline = Pipeline::builder()
            .exception(ExceptionMiddleware::new().show_trace(false))
            .add_stage(Reject)
            .build();

        assert_eq!(pipeline.stage_names(), vec!["exception", "reject"]);
        assert_eq!(pipeline.stage_count(), 2);
        assert!(!pipeline.exception().render_options().show_trace);
    }

    #[test]
    fn test_empty_pipeline_has_exception_stage() {
        let pipeline = Pipeline::builder().build();
        assert_eq!(pipeline.stage_names(), vec!["exception"]);
        assert_eq!(pipeline.stage_count(), 1);
    }
}
