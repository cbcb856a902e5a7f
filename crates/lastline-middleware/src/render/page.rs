//! HTML document assembly.

use super::escape::{escape_html, policy_field};
use super::trace::{write_throw_site, write_trace_line};
use super::RenderOptions;
use lastline_core::{EscapePolicy, Failure, StatusOutcome};
use std::borrow::Cow;

/// Inline stylesheet; pages never reference external resources.
const STYLE: &str = r#"html, body { margin: 0; padding: 0; font-family: sans-serif; }
.failure-code { position: absolute; top: 0.5em; right: 1.2em; font-size: 4em; font-style: italic; color: #fff; }
.failure-code::before { content: "code"; font-size: 0.2em; }
.failure-status { position: absolute; top: 0.5em; left: 1em; font-size: 2em; font-style: italic; color: #fff; }
h1 { margin: 0; padding: 2.5em 1em 1em 1em; background-color: #9b1c3c; color: #fff; }
h1 small { position: absolute; margin-top: -1.3em; font-size: 0.5em; font-weight: normal; color: rgba(255, 255, 255, 0.8); }
h1 small strong { color: #fff; }
p { margin: 0; padding: 1em 2em; background-color: #d0d0d0; }
.stack-trace { margin: 0.4em 2em; }
.trace { margin: 1em 0 0 0; padding: 0.5em 0 0.5em 5em; line-height: 1em; border: 1px solid #e8e8e8; border-radius: 0.5em; background-color: #f8f8f8; }
.trace:hover { background-color: #f0f0f0; }
.trace * { margin: 0; padding: 0; }
.trace .num { position: absolute; width: 1.5em; margin-top: 0.5em; margin-left: -2.2em; font-size: 2em; text-align: right; color: #c8c8c8; }
.trace .path, .trace .line { display: inline; font-family: monospace; font-weight: bold; }
.trace .path::before { content: "file: "; }
.trace .line::before { content: " line: "; }
.trace .path::before, .trace .line::before { font-family: sans-serif; font-size: 0.8em; font-weight: normal; color: #9b1c3c; }
.trace .call { margin: 0.5em 0.3em 0.5em 0; padding: 0.4em; border: 1px dashed #ccb; font-family: monospace; background-color: #eee; }
.trace:hover .call { background-color: #fff; }
.trace .call .call-line { padding-right: 1em; font-weight: bold; color: rgba(0, 0, 0, 0.6); }
.trace.first { border: 2px solid #aaa; background-color: #eee; }
"#;

/// Assembles the complete failure page.
pub(super) fn assemble(failure: &Failure, outcome: StatusOutcome, options: &RenderOptions) -> String {
    let policy = options.escape_policy;
    let title = escape_html(failure.message());
    let headline = match policy {
        EscapePolicy::Strict => escape_html(failure.message()),
        EscapePolicy::Legacy => Cow::Borrowed(failure.message()),
    };
    let type_name = policy_field(failure.type_name(), policy);
    let file = policy_field(failure.location().file(), policy);
    let line = failure.location().line();

    let mut html = format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html>\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<title>{title}</title>\n",
            "<style>\n{style}</style>\n",
            "</head>\n",
            "<body>\n",
            "<div class=\"failure-code\">{code}</div>\n",
            "<div class=\"failure-status\">{status} {phrase}</div>\n",
            "<h1><small><strong>{type_name}</strong> thrown in <strong>{file}</strong> ",
            "on line <strong>{line}</strong></small>{headline}</h1>\n",
            "<p>A failure occurred in file <strong>{file}</strong> on line <strong>{line}</strong></p>\n",
        ),
        title = title,
        style = STYLE,
        code = failure.code(),
        status = outcome.code(),
        phrase = outcome.reason_phrase(),
        type_name = type_name,
        file = file,
        line = line,
        headline = headline,
    );

    if options.show_trace {
        html.push_str("<div class=\"stack-trace\">\n");
        write_throw_site(&mut html, failure, policy);
        for trace_line in failure.trace().lines() {
            write_trace_line(&mut html, &trace_line, policy);
        }
        html.push_str("</div>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}
