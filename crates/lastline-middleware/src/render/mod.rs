//! Failure page rendering.
//!
//! Turns a [`Failure`] into a [`RenderedPage`]: the resolved status plus a
//! self-contained HTML document showing the message, the origin, and the
//! call stack with a synthetic throw-site frame first.
//!
//! # Example
//!
//! ```
//! use lastline_core::Failure;
//! use lastline_middleware::render::{render_page, RenderOptions};
//!
//! let failure = Failure::new("AccessDenied", "Forbidden").with_code(403);
//! let page = render_page(&failure, &RenderOptions::default());
//!
//! assert_eq!(page.outcome().code(), 403);
//! assert!(page.html().contains("<title>Forbidden</title>"));
//! ```

mod escape;
mod page;
mod trace;

pub use escape::{escape_html, quote_message};
pub use trace::throw_expression;

use lastline_core::{resolve_status, EscapePolicy, Failure, StatusOutcome};

/// Options controlling how failure pages are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Which fields are escaped.
    pub escape_policy: EscapePolicy,
    /// Whether the stack trace section is included.
    pub show_trace: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            escape_policy: EscapePolicy::Strict,
            show_trace: true,
        }
    }
}

/// A rendered failure page and the status it was rendered for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    html: String,
    outcome: StatusOutcome,
}

impl RenderedPage {
    /// Returns the HTML document.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Returns the resolved status.
    #[must_use]
    pub const fn outcome(&self) -> StatusOutcome {
        self.outcome
    }

    /// Consumes the page, returning the HTML document.
    #[must_use]
    pub fn into_html(self) -> String {
        self.html
    }
}

/// Resolves the status for `failure` and renders its page.
#[must_use]
pub fn render_page(failure: &Failure, options: &RenderOptions) -> RenderedPage {
    let outcome = resolve_status(failure);
    RenderedPage {
        html: page::assemble(failure, outcome, options),
        outcome,
    }
}
