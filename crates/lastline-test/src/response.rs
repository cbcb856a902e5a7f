//! Test response wrapper.

use crate::error::TestError;
use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, StatusCode};
use lastline_middleware::ResponseExt;
use std::fmt;

/// A collected response with helper methods for assertions.
pub struct TestResponse {
    /// HTTP status code
    status: StatusCode,
    /// Reason phrase attached by the error boundary, if any
    reason_phrase: Option<String>,
    /// Response headers
    headers: HeaderMap,
    /// Response body bytes
    body: Bytes,
}

impl TestResponse {
    /// Collects an HTTP response into a test response.
    pub async fn from_http<B>(response: http::Response<B>) -> Result<Self, TestError>
    where
        B: http_body_util::BodyExt,
        B::Error: fmt::Display,
    {
        let reason_phrase = response.reason_phrase().map(str::to_string);
        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|e| TestError::BodyRead(e.to_string()))?
            .to_bytes();

        Ok(Self {
            status: parts.status,
            reason_phrase,
            headers: parts.headers,
            body,
        })
    }

    /// Creates a test response from raw parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            reason_phrase: None,
            headers,
            body,
        }
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the status code as a u16.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns the reason phrase attached to the response, if any.
    #[must_use]
    pub fn reason_phrase(&self) -> Option<&str> {
        self.reason_phrase.as_deref()
    }

    /// Returns a reference to the headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Gets a header value by name.
    #[must_use]
    pub fn header(&self, name: impl AsRef<str>) -> Option<&HeaderValue> {
        self.headers.get(name.as_ref())
    }

    /// Gets a header value as a string.
    #[must_use]
    pub fn header_str(&self, name: impl AsRef<str>) -> Option<&str> {
        self.header(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the Content-Type header value.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header_str(header::CONTENT_TYPE.as_str())
    }

    /// Returns the raw body bytes.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the body as a string.
    pub fn text(&self) -> Result<String, TestError> {
        Ok(String::from_utf8(self.body.to_vec())?)
    }

    // Assertion methods

    /// Asserts that the status code equals the expected value.
    ///
    /// # Panics
    ///
    /// Panics if the status code doesn't match.
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status, expected,
            "Expected status {}, got {}",
            expected, self.status
        );
        self
    }

    /// Asserts that the reason phrase equals the expected value.
    ///
    /// # Panics
    ///
    /// Panics if no reason phrase is attached or it doesn't match.
    pub fn assert_reason_phrase(&self, expected: impl AsRef<str>) -> &Self {
        let expected = expected.as_ref();
        let actual = self
            .reason_phrase()
            .unwrap_or_else(|| panic!("Expected reason phrase '{}', none attached", expected));
        assert_eq!(actual, expected, "Reason phrase mismatch");
        self
    }

    /// Asserts that a header exists with the expected value.
    ///
    /// # Panics
    ///
    /// Panics if the header doesn't exist or doesn't match.
    pub fn assert_header(&self, name: impl AsRef<str>, expected: impl AsRef<str>) -> &Self {
        let name = name.as_ref();
        let expected = expected.as_ref();
        let actual = self
            .header_str(name)
            .unwrap_or_else(|| panic!("Header '{}' not found", name));
        assert_eq!(
            actual, expected,
            "Header '{}': expected '{}', got '{}'",
            name, expected, actual
        );
        self
    }

    /// Asserts that the response carries the failure page headers.
    ///
    /// # Panics
    ///
    /// Panics if either header is missing or differs.
    pub fn assert_failure_page(&self) -> &Self {
        self.assert_header(header::CONTENT_TYPE.as_str(), "text/html; charset=utf-8")
            .assert_header(header::CACHE_CONTROL.as_str(), "no-cache")
    }

    /// Asserts that the body contains the expected substring.
    ///
    /// # Panics
    ///
    /// Panics if the body doesn't contain the substring.
    pub fn assert_body_contains(&self, expected: impl AsRef<str>) -> &Self {
        let expected = expected.as_ref();
        let body = self.text().expect("Body should be valid UTF-8");
        assert!(
            body.contains(expected),
            "Body should contain '{}', got: {}",
            expected,
            body
        );
        self
    }

    /// Asserts that the body does not contain the given substring.
    ///
    /// # Panics
    ///
    /// Panics if the body contains the substring.
    pub fn assert_body_lacks(&self, unexpected: impl AsRef<str>) -> &Self {
        let unexpected = unexpected.as_ref();
        let body = self.text().expect("Body should be valid UTF-8");
        assert!(
            !body.contains(unexpected),
            "Body should not contain '{}', got: {}",
            unexpected,
            body
        );
        self
    }

    /// Asserts that the body equals the expected string.
    ///
    /// # Panics
    ///
    /// Panics if the body doesn't match.
    pub fn assert_body_eq(&self, expected: impl AsRef<str>) -> &Self {
        let body = self.text().expect("Body should be valid UTF-8");
        assert_eq!(body, expected.as_ref(), "Body mismatch");
        self
    }
}

impl fmt::Debug for TestResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestResponse")
            .field("status", &self.status)
            .field("reason_phrase", &self.reason_phrase)
            .field("headers", &self.headers)
            .field("body_len", &self.body.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;

    fn create_response(status: u16, body: &str) -> TestResponse {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"));
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        TestResponse::new(
            StatusCode::from_u16(status).unwrap(),
            headers,
            Bytes::from(body.to_string()),
        )
    }

    #[test]
    fn test_status() {
        let response = create_response(404, "");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.status_code(), 404);
        assert!(response.reason_phrase().is_none());
    }

    #[test]
    fn test_header() {
        let response = create_response(200, "");
        assert_eq!(response.content_type(), Some("text/html; charset=utf-8"));
        assert_eq!(response.header_str("cache-control"), Some("no-cache"));
        assert!(response.header("x-missing").is_none());
    }

    #[test]
    fn test_body_assertions() {
        let response = create_response(500, "<h1>boom</h1>");
        response
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
            .assert_failure_page()
            .assert_body_contains("boom")
            .assert_body_lacks("<script>");
        assert_eq!(response.text().unwrap(), "<h1>boom</h1>");
    }

    #[test]
    #[should_panic(expected = "Body should contain")]
    fn test_assert_body_contains_fails() {
        create_response(200, "abc").assert_body_contains("xyz");
    }

    #[tokio::test]
    async fn test_from_http() {
        let response = http::Response::builder()
            .status(StatusCode::CREATED)
            .header("x-id", "7")
            .body(Full::new(Bytes::from("made")))
            .unwrap();

        let response = TestResponse::from_http(response).await.unwrap();
        response.assert_status(StatusCode::CREATED).assert_header("x-id", "7");
        response.assert_body_eq("made");
    }
}
