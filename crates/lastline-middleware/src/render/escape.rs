//! Escaping of values interpolated into failure pages.

use html_escape::encode_quoted_attribute;
use lastline_core::EscapePolicy;
use std::borrow::Cow;

/// Escapes `&`, `<`, `>`, `"` and `'` for HTML text and attribute contexts.
pub fn escape_html(value: &str) -> Cow<'_, str> {
    encode_quoted_attribute(value)
}

/// Renders `value` as a JSON string literal, then escapes it for HTML.
///
/// Under [`EscapePolicy::Legacy`] the literal also escapes `/` and every
/// non-ASCII character as `\uXXXX` UTF-16 units, the form older pages used.
///
/// ```
/// use lastline_core::EscapePolicy;
/// use lastline_middleware::render::quote_message;
///
/// assert_eq!(quote_message("Forbidden", EscapePolicy::Strict), "&quot;Forbidden&quot;");
/// assert_eq!(quote_message("a/b", EscapePolicy::Legacy), "&quot;a\\/b&quot;");
/// ```
pub fn quote_message(value: &str, policy: EscapePolicy) -> String {
    let literal = serde_json::Value::String(value.to_string()).to_string();
    let literal = match policy {
        EscapePolicy::Strict => literal,
        EscapePolicy::Legacy => legacy_literal(&literal),
    };
    escape_html(&literal).into_owned()
}

/// Rewrites a JSON literal into the slash- and ASCII-escaped legacy form.
fn legacy_literal(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    for ch in literal.chars() {
        match ch {
            '/' => out.push_str("\\/"),
            ch if ch.is_ascii() => out.push(ch),
            ch => {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{unit:04x}"));
                }
            }
        }
    }
    out
}

/// Applies `policy` to a field that legacy pages inserted verbatim.
pub(crate) fn policy_field(value: &str, policy: EscapePolicy) -> Cow<'_, str> {
    if policy.escapes_all() {
        escape_html(value)
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x" & 'y')</script>"#),
            "&lt;script&gt;alert(&quot;x&quot; &amp; &#x27;y&#x27;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_escape_html_borrows_clean_input() {
        assert!(matches!(escape_html("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_quote_message_escapes_json_then_html() {
        assert_eq!(
            quote_message("<b>\"hi\"</b>\n", EscapePolicy::Strict),
            "&quot;&lt;b&gt;\\&quot;hi\\&quot;&lt;/b&gt;\\n&quot;"
        );
    }

    #[test]
    fn test_quote_message_strict_keeps_slashes_and_unicode() {
        assert_eq!(quote_message("a/b é", EscapePolicy::Strict), "&quot;a/b é&quot;");
    }

    #[test]
    fn test_quote_message_legacy_escapes_slashes_and_unicode() {
        assert_eq!(quote_message("a/b", EscapePolicy::Legacy), "&quot;a\\/b&quot;");
        assert_eq!(quote_message("é", EscapePolicy::Legacy), "&quot;\\u00e9&quot;");
        assert_eq!(
            quote_message("\u{1F600}", EscapePolicy::Legacy),
            "&quot;\\ud83d\\ude00&quot;"
        );
        assert_eq!(
            quote_message("<\"x\">\n", EscapePolicy::Legacy),
            quote_message("<\"x\">\n", EscapePolicy::Strict)
        );
    }

    #[test]
    fn test_policy_field() {
        assert_eq!(policy_field("<a>", EscapePolicy::Strict), "&lt;a&gt;");
        assert_eq!(policy_field("<a>", EscapePolicy::Legacy), "<a>");
    }
}
