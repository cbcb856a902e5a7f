//! HTTP status resolution for failures.
//!
//! A failure's numeric code doubles as its HTTP status when the code is a
//! known status. Anything else (absent, zero, negative, unregistered) resolves
//! to `500 Internal Server Error`.
//!
//! # Example
//!
//! ```
//! use lastline_core::status::StatusOutcome;
//!
//! assert_eq!(StatusOutcome::for_code(404).reason_phrase(), "Not Found");
//! assert_eq!(StatusOutcome::for_code(999).code(), 500);
//! ```

use crate::Failure;
use http::StatusCode;

/// Registered status codes and their reason phrases, sorted by code.
pub const REASON_PHRASES: &[(u16, &str)] = &[
    (100, "Continue"),
    (101, "Switching Protocols"),
    (102, "Processing"),
    (103, "Early Hints"),
    (200, "OK"),
    (201, "Created"),
    (202, "Accepted"),
    (203, "Non-Authoritative Information"),
    (204, "No Content"),
    (205, "Reset Content"),
    (206, "Partial Content"),
    (207, "Multi-Status"),
    (208, "Already Reported"),
    (226, "IM Used"),
    (300, "Multiple Choices"),
    (301, "Moved Permanently"),
    (302, "Found"),
    (303, "See Other"),
    (304, "Not Modified"),
    (305, "Use Proxy"),
    (307, "Temporary Redirect"),
    (308, "Permanent Redirect"),
    (400, "Bad Request"),
    (401, "Unauthorized"),
    (402, "Payment Required"),
    (403, "Forbidden"),
    (404, "Not Found"),
    (405, "Method Not Allowed"),
    (406, "Not Acceptable"),
    (407, "Proxy Authentication Required"),
    (408, "Request Timeout"),
    (409, "Conflict"),
    (410, "Gone"),
    (411, "Length Required"),
    (412, "Precondition Failed"),
    (413, "Content Too Large"),
    (414, "URI Too Long"),
    (415, "Unsupported Media Type"),
    (416, "Range Not Satisfiable"),
    (417, "Expectation Failed"),
    (418, "I'm a teapot"),
    (421, "Misdirected Request"),
    (422, "Unprocessable Content"),
    (423, "Locked"),
    (424, "Failed Dependency"),
    (425, "Too Early"),
    (426, "Upgrade Required"),
    (428, "Precondition Required"),
    (429, "Too Many Requests"),
    (431, "Request Header Fields Too Large"),
    (451, "Unavailable For Legal Reasons"),
    (500, "Internal Server Error"),
    (501, "Not Implemented"),
    (502, "Bad Gateway"),
    (503, "Service Unavailable"),
    (504, "Gateway Timeout"),
    (505, "HTTP Version Not Supported"),
    (506, "Variant Also Negotiates"),
    (507, "Insufficient Storage"),
    (508, "Loop Detected"),
    (510, "Not Extended"),
    (511, "Network Authentication Required"),
];

/// Looks up the reason phrase for a registered status code.
#[must_use]
pub fn reason_phrase(code: u16) -> Option<&'static str> {
    REASON_PHRASES
        .binary_search_by_key(&code, |(c, _)| *c)
        .ok()
        .map(|idx| REASON_PHRASES[idx].1)
}

/// A resolved HTTP status code and reason phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusOutcome {
    status: StatusCode,
    reason_phrase: &'static str,
}

impl StatusOutcome {
    /// The fallback outcome, `500 Internal Server Error`.
    pub const INTERNAL_SERVER_ERROR: Self = Self {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        reason_phrase: "Internal Server Error",
    };

    /// Resolves the outcome for a raw failure code.
    ///
    /// Registered codes map to themselves; every other value maps to
    /// [`StatusOutcome::INTERNAL_SERVER_ERROR`].
    #[must_use]
    pub fn for_code(code: i64) -> Self {
        u16::try_from(code)
            .ok()
            .and_then(|code| {
                let phrase = reason_phrase(code)?;
                let status = StatusCode::from_u16(code).ok()?;
                Some(Self {
                    status,
                    reason_phrase: phrase,
                })
            })
            .unwrap_or(Self::INTERNAL_SERVER_ERROR)
    }

    /// Returns the HTTP status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the numeric status code.
    #[must_use]
    pub fn code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns the reason phrase.
    #[must_use]
    pub const fn reason_phrase(&self) -> &'static str {
        self.reason_phrase
    }
}

impl Default for StatusOutcome {
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl std::fmt::Display for StatusOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code(), self.reason_phrase)
    }
}

/// Resolves the HTTP status for a failure from its numeric code.
#[must_use]
pub fn resolve_status(failure: &Failure) -> StatusOutcome {
    StatusOutcome::for_code(failure.code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_table_is_sorted_and_unique() {
        for pair in REASON_PHRASES.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} before {}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn test_table_codes_are_valid_status_codes() {
        for (code, _) in REASON_PHRASES {
            assert!(StatusCode::from_u16(*code).is_ok(), "invalid code {code}");
        }
    }

    #[test]
    fn test_zero_code_is_internal_server_error() {
        let outcome = resolve_status(&Failure::new("RuntimeError", "boom"));
        assert_eq!(outcome.code(), 500);
        assert_eq!(outcome.reason_phrase(), "Internal Server Error");
    }

    #[test]
    fn test_known_code_resolves_to_itself() {
        let failure = Failure::new("NotFound", "missing").with_code(404);
        let outcome = resolve_status(&failure);
        assert_eq!(outcome.status(), StatusCode::NOT_FOUND);
        assert_eq!(outcome.reason_phrase(), "Not Found");
    }

    #[test]
    fn test_unknown_code_falls_back() {
        let failure = Failure::new("Weird", "odd").with_code(999);
        assert_eq!(resolve_status(&failure), StatusOutcome::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_negative_and_huge_codes_fall_back() {
        assert_eq!(StatusOutcome::for_code(-404).code(), 500);
        assert_eq!(StatusOutcome::for_code(i64::MAX).code(), 500);
        assert_eq!(StatusOutcome::for_code(65_936).code(), 500);
    }

    #[test]
    fn test_success_codes_are_not_rewritten() {
        // A failure that carries 200 still resolves to 200.
        assert_eq!(StatusOutcome::for_code(200).to_string(), "200 OK");
    }

    proptest! {
        #[test]
        fn prop_registered_codes_resolve_to_themselves(idx in 0..REASON_PHRASES.len()) {
            let (code, phrase) = REASON_PHRASES[idx];
            let outcome = StatusOutcome::for_code(i64::from(code));
            prop_assert_eq!(outcome.code(), code);
            prop_assert_eq!(outcome.reason_phrase(), phrase);
        }

        #[test]
        fn prop_unregistered_codes_resolve_to_500(code in any::<i64>()) {
            let registered = u16::try_from(code).ok().and_then(reason_phrase).is_some();
            prop_assume!(!registered);
            prop_assert_eq!(StatusOutcome::for_code(code), StatusOutcome::INTERNAL_SERVER_ERROR);
        }
    }
}
