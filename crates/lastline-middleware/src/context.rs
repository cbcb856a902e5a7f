//! Middleware context types.
//!
//! The [`MiddlewareContext`] carries per-request state through the middleware
//! pipeline. It is request-scoped: nothing in it is shared between concurrent
//! invocations.

use lastline_core::RequestId;
use std::time::{Duration, Instant};

/// Context that flows through the middleware pipeline.
///
/// # Example
///
/// ```
/// use lastline_middleware::context::MiddlewareContext;
///
/// let ctx = MiddlewareContext::new();
/// println!("handling {}", ctx.request_id());
/// ```
#[derive(Debug, Clone)]
pub struct MiddlewareContext {
    /// Unique identifier for this request.
    request_id: RequestId,

    /// When the request started processing.
    started_at: Instant,
}

impl MiddlewareContext {
    /// Creates a new middleware context with a fresh request ID.
    #[must_use]
    pub fn new() -> Self {
        Self::with_request_id(RequestId::new())
    }

    /// Creates a context with a specific request ID.
    ///
    /// Useful when the request ID was provided by a client or upstream service.
    #[must_use]
    pub fn with_request_id(request_id: RequestId) -> Self {
        Self {
            request_id,
            started_at: Instant::now(),
        }
    }

    /// Returns the request ID.
    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Returns when the request started processing.
    #[must_use]
    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Returns the elapsed time since the request started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

impl Default for MiddlewareContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_request_id() {
        let id = RequestId::new();
        let ctx = MiddlewareContext::with_request_id(id);
        assert_eq!(ctx.request_id(), id);
    }

    #[test]
    fn test_fresh_contexts_have_distinct_ids() {
        assert_ne!(
            MiddlewareContext::new().request_id(),
            MiddlewareContext::new().request_id()
        );
    }

    #[test]
    fn test_elapsed_time() {
        let ctx = MiddlewareContext::new();
        std::thread::sleep(Duration::from_millis(10));
        assert!(ctx.elapsed() >= Duration::from_millis(10));
    }
}
