//! Test error types.

use thiserror::Error;

/// Errors that can occur while collecting a response under test.
#[derive(Debug, Error)]
pub enum TestError {
    /// Response body reading failed.
    #[error("Body read error: {0}")]
    BodyRead(String),

    /// Response body is not valid UTF-8.
    #[error("Body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
