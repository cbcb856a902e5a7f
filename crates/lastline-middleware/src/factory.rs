//! Response and body construction capabilities.
//!
//! The exception stage never builds responses directly. It asks a
//! [`ResponseFactory`] for a response with a status and reason phrase, adds
//! its headers, and attaches a body produced by a [`StreamFactory`]. Hosts
//! with their own response conventions can swap either capability.

use bytes::Bytes;
use http::response::Builder;
use http::StatusCode;
use http_body_util::Full;
use hyper::ext::ReasonPhrase;
use lastline_core::{LastlineError, LastlineResult};

/// Creates responses for a status code and reason phrase.
pub trait ResponseFactory: Send + Sync + 'static {
    /// Starts a response with the given status line.
    ///
    /// The returned builder accepts further headers and a body.
    fn create_response(&self, status: StatusCode, reason_phrase: &str) -> LastlineResult<Builder>;
}

/// Wraps string content as a response body.
pub trait StreamFactory: Send + Sync + 'static {
    /// Creates a body from the given content.
    fn create_stream(&self, content: String) -> Full<Bytes>;
}

/// The default factory, building plain `http` responses.
///
/// The reason phrase is attached as a [`ReasonPhrase`] extension, which
/// hyper writes on the HTTP/1 status line in place of the canonical phrase.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpFactory;

impl ResponseFactory for HttpFactory {
    fn create_response(&self, status: StatusCode, reason_phrase: &str) -> LastlineResult<Builder> {
        let phrase = ReasonPhrase::try_from(reason_phrase.as_bytes())
            .map_err(|_| LastlineError::invalid_reason_phrase(reason_phrase))?;

        Ok(http::Response::builder().status(status).extension(phrase))
    }
}

impl StreamFactory for HttpFactory {
    fn create_stream(&self, content: String) -> Full<Bytes> {
        Full::new(Bytes::from(content))
    }
}
