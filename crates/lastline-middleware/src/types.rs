//! Common types used throughout the middleware pipeline.

use bytes::Bytes;
use http_body_util::Full;
use hyper::ext::ReasonPhrase;
use lastline_core::Failure;

/// The HTTP request type used in the middleware pipeline.
///
/// This is a standard `http::Request` with a `Full<Bytes>` body.
pub type Request = http::Request<Full<Bytes>>;

/// The HTTP response type used in the middleware pipeline.
///
/// This is a standard `http::Response` with a `Full<Bytes>` body.
pub type Response = http::Response<Full<Bytes>>;

/// The outcome of a downstream handler or middleware.
///
/// Downstream code reports unhandled failures as `Err(Failure)` instead of
/// unwinding; the exception stage is the single place that turns them into
/// responses.
pub type HandlerResult = Result<Response, Failure>;

/// Extension trait for reading response metadata set by the error boundary.
pub trait ResponseExt {
    /// Returns the HTTP/1 reason phrase attached to the response, if any.
    fn reason_phrase(&self) -> Option<&str>;
}

impl<B> ResponseExt for http::Response<B> {
    fn reason_phrase(&self) -> Option<&str> {
        self.extensions()
            .get::<ReasonPhrase>()
            .and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
    }
}
