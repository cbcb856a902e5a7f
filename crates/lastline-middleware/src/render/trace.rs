//! Stack trace markup.
//!
//! Every frame, real or synthetic, renders as the same block:
//!
//! ```html
//! <div class="trace">
//!     <div class="num">0</div>
//!     <div class="path">/srv/app/Router.php</div>
//!     <div class="line">88</div>
//!     <div class="call"><span class="call-line">88</span>dispatch()</div>
//! </div>
//! ```

use super::escape::{policy_field, quote_message};
use lastline_core::{EscapePolicy, Failure, TraceLine};

/// Marker shown in place of a frame index on the throw-site block.
const THROW_SITE_MARKER: &str = "\u{26a0}\u{fe0f}";

/// The parts of a trace block, already escaped as required.
struct Block<'a> {
    class: &'a str,
    num: &'a str,
    path: &'a str,
    line: &'a str,
    call: &'a str,
}

fn write_block(out: &mut String, block: &Block<'_>) {
    out.push_str(&format!(
        concat!(
            "<div class=\"{class}\">\n",
            "    <div class=\"num\">{num}</div>\n",
            "    <div class=\"path\">{path}</div>\n",
            "    <div class=\"line\">{line}</div>\n",
            "    <div class=\"call\"><span class=\"call-line\">{line}</span>{call}</div>\n",
            "</div>\n",
        ),
        class = block.class,
        num = block.num,
        path = block.path,
        line = block.line,
        call = block.call,
    ));
}

/// Builds the synthetic constructor call shown for the throw site.
///
/// The code argument is only included when the failure carries a non-zero
/// code.
pub fn throw_expression(failure: &Failure, policy: EscapePolicy) -> String {
    let code = match failure.code() {
        0 => String::new(),
        code => format!(", {code}"),
    };
    format!(
        "throw new {}({}{code});",
        policy_field(failure.type_name(), policy),
        quote_message(failure.message(), policy)
    )
}

/// Renders the block for the place the failure was raised.
pub fn write_throw_site(out: &mut String, failure: &Failure, policy: EscapePolicy) {
    let call = format!("<em>{}</em>", throw_expression(failure, policy));
    write_block(
        out,
        &Block {
            class: "trace first",
            num: THROW_SITE_MARKER,
            path: &policy_field(failure.location().file(), policy),
            line: &failure.location().line().to_string(),
            call: &call,
        },
    );
}

/// Renders one line of the real call stack.
///
/// Frames become blocks. Anything else is emitted as-is, subject only to the
/// escape policy.
pub fn write_trace_line(out: &mut String, line: &TraceLine, policy: EscapePolicy) {
    match line {
        TraceLine::Frame(frame) => write_block(
            out,
            &Block {
                class: "trace",
                num: frame.index(),
                path: &policy_field(frame.file(), policy),
                line: frame.line(),
                call: &policy_field(frame.call(), policy),
            },
        ),
        TraceLine::Raw(text) => {
            out.push_str(&policy_field(text, policy));
            out.push('\n');
        }
    }
}
