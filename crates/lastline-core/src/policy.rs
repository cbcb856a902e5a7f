//! Escaping policy for rendered failure pages.

use serde::{Deserialize, Serialize};

/// How dynamic values are inserted into a rendered failure page.
///
/// The message is always escaped in the title, and the quoted message in the
/// synthetic throw line is always JSON-encoded then escaped. The policy
/// decides the JSON flavour and what happens to everything else.
///
/// | Field | `Strict` | `Legacy` |
/// |---|---|---|
/// | title message | escaped | escaped |
/// | headline message | escaped | verbatim |
/// | quoted message | JSON + escaped | JSON with `\/` and `\uXXXX` + escaped |
/// | type name | escaped | verbatim |
/// | file paths | escaped | verbatim |
/// | frame call expressions | escaped | verbatim |
/// | unparsed trace lines | escaped | verbatim |
///
/// `Legacy` reproduces the escaping older deployments applied. Paths, type
/// names and trace text may be influenced by request input, so it is only
/// safe when those values are trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscapePolicy {
    /// Escape every interpolated value.
    #[default]
    Strict,
    /// Insert the headline message, type name, paths and trace text verbatim.
    Legacy,
}

impl EscapePolicy {
    /// Returns `true` if fields outside the title and quoted message are escaped.
    #[must_use]
    pub const fn escapes_all(self) -> bool {
        matches!(self, Self::Strict)
    }
}
