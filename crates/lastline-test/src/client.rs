//! In-memory client driving a pipeline.

use crate::error::TestError;
use crate::fixtures::Handler;
use crate::response::TestResponse;
use lastline_middleware::{ExceptionMiddleware, MiddlewareContext, Pipeline, Request};

/// Sends requests through a [`Pipeline`] without a network.
///
/// # Example
///
/// ```
/// use lastline_test::{fixtures, TestClient};
///
/// # tokio_test::block_on(async {
/// let client = TestClient::default();
/// let response = client
///     .send(fixtures::request("/admin"), fixtures::fail(fixtures::forbidden()))
///     .await
///     .unwrap();
///
/// response.assert_status(http::StatusCode::FORBIDDEN);
/// # });
/// ```
#[derive(Debug)]
pub struct TestClient {
    pipeline: Pipeline,
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new(Pipeline::builder().build())
    }
}

impl TestClient {
    /// Creates a client for `pipeline`.
    #[must_use]
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// Creates a client for a pipeline with only the given exception stage.
    #[must_use]
    pub fn with_exception(exception: ExceptionMiddleware) -> Self {
        Self::new(Pipeline::builder().exception(exception).build())
    }

    /// Returns the pipeline under test.
    #[must_use]
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Processes `request` with `handler` as the downstream and collects the
    /// response.
    pub async fn send<H: Handler>(&self, request: Request, handler: H) -> Result<TestResponse, TestError> {
        self.send_with_context(MiddlewareContext::new(), request, handler)
            .await
    }

    /// Like [`send`](Self::send), with a caller-supplied context.
    pub async fn send_with_context<H: Handler>(
        &self,
        ctx: MiddlewareContext,
        request: Request,
        handler: H,
    ) -> Result<TestResponse, TestError> {
        let response = self.pipeline.process(ctx, request, handler).await;
        TestResponse::from_http(response).await
    }
}
