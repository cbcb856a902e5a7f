//! Error types for Lastline.
//!
//! The error boundary itself never surfaces these to clients. They describe
//! the few ways building a response from parts can fail, so callers that
//! construct responses by hand can propagate them with `?`.

use thiserror::Error;

/// Result type alias using [`LastlineError`].
pub type LastlineResult<T> = Result<T, LastlineError>;

/// Standard error type for Lastline.
#[derive(Error, Debug)]
pub enum LastlineError {
    /// A reason phrase contained bytes not allowed on an HTTP/1 status line.
    #[error("invalid reason phrase: {phrase:?}")]
    InvalidReasonPhrase {
        /// The rejected phrase.
        phrase: String,
    },

    /// The response could not be assembled.
    #[error("failed to build response: {0}")]
    ResponseBuild(#[from] http::Error),
}

impl LastlineError {
    /// Creates an invalid reason phrase error.
    #[must_use]
    pub fn invalid_reason_phrase(phrase: impl Into<String>) -> Self {
        Self::InvalidReasonPhrase {
            phrase: phrase.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_reason_phrase_display() {
        let err = LastlineError::invalid_reason_phrase("bad\nphrase");
        assert!(err.to_string().contains("invalid reason phrase"));
        assert!(err.to_string().contains("bad\\nphrase"));
    }

    #[test]
    fn test_from_http_error() {
        let http_err = http::Response::builder()
            .header("bad header name", "x")
            .body(())
            .unwrap_err();
        let err: LastlineError = http_err.into();
        assert!(matches!(err, LastlineError::ResponseBuild(_)));
    }
}
