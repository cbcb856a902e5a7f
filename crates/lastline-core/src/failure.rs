//! The [`Failure`] type carried from downstream handlers to the error boundary.

use crate::trace::{Frame, StackTrace};
use std::any::Any;
use std::fmt;
use std::panic::Location as CallerLocation;

/// The place a failure was raised.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    file: String,
    line: u32,
}

impl Location {
    /// Placeholder file name used when the origin is unknown.
    pub const UNKNOWN_FILE: &'static str = "[unknown]";

    /// Creates a location from a file path and line number.
    #[must_use]
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// A location for failures whose origin was not recorded.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(Self::UNKNOWN_FILE, 0)
    }

    /// Returns the source file path.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Returns the line number.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }
}

impl From<&CallerLocation<'_>> for Location {
    fn from(location: &CallerLocation<'_>) -> Self {
        Self::new(location.file(), location.line())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// An unhandled failure raised while processing a request.
///
/// Failures are created by downstream code and are read-only to the error
/// boundary. All attributes have usable defaults, so a failure built from
/// incomplete data still renders.
///
/// # Example
///
/// ```
/// use lastline_core::{Failure, Frame};
///
/// let failure = Failure::new("AccessDenied", "Forbidden")
///     .with_code(403)
///     .at("src/routes/admin.rs", 42)
///     .with_frames(vec![Frame::new(0, "src/routes/mod.rs", 17, "admin::show()")]);
///
/// assert_eq!(failure.code(), 403);
/// assert_eq!(failure.location().line(), 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    type_name: String,
    message: String,
    code: i64,
    location: Location,
    trace: StackTrace,
}

impl Failure {
    /// Type name given to failures converted from panics.
    pub const PANIC_TYPE_NAME: &'static str = "panic";

    /// Creates a failure raised at the caller's location.
    #[must_use]
    #[track_caller]
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            code: 0,
            location: Location::from(CallerLocation::caller()),
            trace: StackTrace::default(),
        }
    }

    /// Creates a failure from any error value.
    ///
    /// The type name is the Rust type of the error and the message is its
    /// `Display` output.
    ///
    /// ```
    /// use lastline_core::Failure;
    ///
    /// let err = "abc".parse::<u32>().unwrap_err();
    /// let failure = Failure::from_error(&err);
    /// assert!(failure.type_name().ends_with("ParseIntError"));
    /// ```
    #[must_use]
    #[track_caller]
    pub fn from_error<E>(error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        Self::new(std::any::type_name::<E>(), error.to_string())
    }

    /// Creates a failure from a caught panic payload.
    ///
    /// `&str` and `String` payloads become the message; anything else gets a
    /// generic message. The origin of a panic is not known here.
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };

        Self {
            type_name: Self::PANIC_TYPE_NAME.to_string(),
            message,
            code: 0,
            location: Location::unknown(),
            trace: StackTrace::default(),
        }
    }

    /// Sets the numeric code.
    #[must_use]
    pub fn with_code(mut self, code: i64) -> Self {
        self.code = code;
        self
    }

    /// Overrides the origin location.
    #[must_use]
    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.location = Location::new(file, line);
        self
    }

    /// Attaches a structured call stack.
    #[must_use]
    pub fn with_frames(mut self, frames: Vec<Frame>) -> Self {
        self.trace = StackTrace::Frames(frames);
        self
    }

    /// Attaches a pre-formatted textual call stack.
    #[must_use]
    pub fn with_trace_text(mut self, text: impl Into<String>) -> Self {
        self.trace = StackTrace::Text(text.into());
        self
    }

    /// Returns the type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the numeric code, `0` when none was set.
    #[must_use]
    pub const fn code(&self) -> i64 {
        self.code
    }

    /// Returns the origin location.
    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// Returns the call stack.
    #[must_use]
    pub const fn trace(&self) -> &StackTrace {
        &self.trace
    }

    /// Returns `true` if this failure was converted from a panic.
    #[must_use]
    pub fn is_panic(&self) -> bool {
        self.type_name == Self::PANIC_TYPE_NAME
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.message)?;
        if self.code != 0 {
            write!(f, " (code {})", self.code)?;
        }
        write!(f, " at {}", self.location)
    }
}
