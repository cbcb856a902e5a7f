//! Call stacks attached to failures.
//!
//! A stack is either captured as structured [`Frame`] records, or received as
//! opaque text with one frame per line in the form
//! `#<index> <path>(<line>): <call-expression>`. Text stacks are parsed line by
//! line; lines that do not match the frame pattern are kept verbatim as
//! [`TraceLine::Raw`] so foreign or malformed trace text never breaks
//! rendering.
//!
//! # Example
//!
//! ```
//! use lastline_core::{StackTrace, TraceLine};
//!
//! let trace = StackTrace::Text("#0 /srv/app.php(12): run()\n#1 {main}".to_string());
//! let lines = trace.lines();
//!
//! assert!(matches!(&lines[0], TraceLine::Frame(frame) if frame.line() == "12"));
//! assert!(matches!(&lines[1], TraceLine::Raw(text) if text == "#1 {main}"));
//! ```

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Pattern for one textual stack frame.
const FRAME_PATTERN: &str = r"^#(?P<num>\d+) (?P<path>[^(]+)\((?P<line>\d+)\): (?P<call>.*)$";

fn frame_regex() -> &'static Regex {
    static FRAME_RE: OnceLock<Regex> = OnceLock::new();
    FRAME_RE.get_or_init(|| Regex::new(FRAME_PATTERN).expect("frame pattern is a valid regex"))
}

/// One entry in a call stack.
///
/// The index and line number are kept as the decimal text they were written
/// with, so frames parsed from text render exactly as received regardless of
/// magnitude.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    index: String,
    file: String,
    line: String,
    call: String,
}

impl Frame {
    /// Creates a frame.
    #[must_use]
    pub fn new(index: usize, file: impl Into<String>, line: u32, call: impl Into<String>) -> Self {
        Self {
            index: index.to_string(),
            file: file.into(),
            line: line.to_string(),
            call: call.into(),
        }
    }

    /// Parses a single textual frame line.
    ///
    /// Returns `None` only if the line does not match the frame pattern.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let caps = frame_regex().captures(line)?;
        Some(Self {
            index: caps["num"].to_string(),
            file: caps["path"].to_string(),
            line: caps["line"].to_string(),
            call: caps["call"].to_string(),
        })
    }

    /// Returns the position of this frame in its stack, as decimal digits.
    #[must_use]
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Returns the call-site file path.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Returns the call-site line number, as decimal digits.
    #[must_use]
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Returns the call expression.
    #[must_use]
    pub fn call(&self) -> &str {
        &self.call
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}({}): {}", self.index, self.file, self.line, self.call)
    }
}

/// A line of a call stack as seen by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceLine {
    /// A recognised frame.
    Frame(Frame),
    /// Text that is not a frame, passed through unchanged.
    Raw(String),
}

/// The call stack of a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackTrace {
    /// Frames captured as structured records.
    Frames(Vec<Frame>),
    /// Pre-formatted text, one frame per line.
    Text(String),
}

impl Default for StackTrace {
    fn default() -> Self {
        Self::Frames(Vec::new())
    }
}

impl StackTrace {
    /// Returns the stack as renderable lines, in original order.
    #[must_use]
    pub fn lines(&self) -> Vec<TraceLine> {
        match self {
            Self::Frames(frames) => frames.iter().cloned().map(TraceLine::Frame).collect(),
            Self::Text(text) => text
                .lines()
                .map(|line| {
                    Frame::parse(line).map_or_else(|| TraceLine::Raw(line.to_string()), TraceLine::Frame)
                })
                .collect(),
        }
    }

    /// Returns `true` if the stack has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Frames(frames) => frames.is_empty(),
            Self::Text(text) => text.lines().next().is_none(),
        }
    }
}
