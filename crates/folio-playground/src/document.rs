//! Document assembly
//!
//! Turns a [`RenderRequest`] and the sandbox outcome into one complete HTML
//! document. Fragments are embedded verbatim apart from closing-tag
//! sequences, which are neutralised so no fragment can terminate its own
//! container element.

use crate::buffer::RenderRequest;
use folio_sandbox::{ExecutionError, ExecutionReport};
use std::borrow::Cow;

/// Element id of the visible error notice
pub const NOTICE_ID: &str = "folio-error";

/// Inline style of the error notice
pub const NOTICE_STYLE: &str = "color:red;background:#fff;padding:10px;border-radius:5px;\
margin-top:10px;border:1px solid #ddd;";

/// Base style applied before the presentation fragment
pub const BASE_STYLE: &str = "body{margin:0;padding:20px;font-family:Arial,sans-serif;\
background:#f5f5f5;}";

/// Sandbox attribute for frame hosts: scripts run, but without same-origin access
pub const FRAME_SANDBOX: &str = "allow-scripts";

/// Result of one render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    sequence: u64,
    html: String,
    outcome: Result<ExecutionReport, ExecutionError>,
}

impl RenderedDocument {
    /// Assemble the document for `request`
    ///
    /// When `outcome` is an error, a visible notice is placed after the
    /// structure fragment. The behavior fragment is still embedded inside
    /// its in-document boundary so browser hosts see the same failure
    /// reported in the same element.
    #[must_use]
    pub fn assemble(
        request: &RenderRequest,
        outcome: Result<ExecutionReport, ExecutionError>,
        base_style: &str,
    ) -> Self {
        let mut html = String::with_capacity(
            512 + base_style.len()
                + request.structure().len()
                + request.presentation().len()
                + request.behavior().len() * 2,
        );

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n");
        html.push_str(&neutralize_style(base_style));
        html.push('\n');
        html.push_str(&neutralize_style(request.presentation()));
        html.push_str("\n</style>\n</head>\n<body>\n");
        html.push_str(request.structure());
        html.push('\n');

        if let Err(err) = &outcome {
            html.push_str(&notice_html(err));
            html.push('\n');
        }

        if !request.behavior().trim().is_empty() {
            html.push_str("<script>\n");
            html.push_str(&boundary_script(request.behavior()));
            html.push_str("</script>\n");
        }

        html.push_str("</body>\n</html>\n");

        Self {
            sequence: request.sequence(),
            html,
            outcome,
        }
    }

    /// Sequence number of the request this document was built from
    #[inline]
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Complete HTML text
    #[inline]
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Outcome of executing the behavior fragment
    #[inline]
    #[must_use]
    pub fn outcome(&self) -> &Result<ExecutionReport, ExecutionError> {
        &self.outcome
    }

    /// The contained failure, if the behavior fragment raised one
    #[must_use]
    pub fn error(&self) -> Option<&ExecutionError> {
        self.outcome.as_ref().err()
    }

    /// Wrap the document in a sandboxed inline frame
    #[must_use]
    pub fn to_frame(&self) -> String {
        format!(
            "<iframe sandbox=\"{FRAME_SANDBOX}\" title=\"Playground preview\" srcdoc=\"{}\"></iframe>",
            escape_attribute(&self.html)
        )
    }
}

/// Static error notice inserted by the renderer
#[must_use]
pub fn notice_html(err: &ExecutionError) -> String {
    format!(
        "<div id=\"{NOTICE_ID}\" role=\"alert\" style=\"{NOTICE_STYLE}\"><strong>Error:</strong> {}</div>",
        escape_html(&err.to_string())
    )
}

/// Script that runs `behavior` inside the in-document containment boundary
///
/// The source travels as a string literal and runs through indirect eval,
/// so syntax errors are caught as well and top-level declarations stay
/// global for inline handlers.
#[must_use]
pub fn boundary_script(behavior: &str) -> String {
    format!(
        r#"(function () {{
  var source = {literal};
  try {{
    (0, eval)(source);
  }} catch (e) {{
    console.error("Error:", e);
    var notice = document.getElementById("{NOTICE_ID}");
    if (!notice) {{
      notice = document.createElement("div");
      notice.id = "{NOTICE_ID}";
      notice.setAttribute("role", "alert");
      notice.setAttribute("style", "{NOTICE_STYLE}");
      document.body.appendChild(notice);
    }}
    var kind = e && e.name ? e.name : "Error";
    var message = e && e.message !== undefined ? e.message : String(e);
    notice.textContent = "";
    var label = document.createElement("strong");
    label.textContent = "Error:";
    notice.appendChild(label);
    notice.appendChild(document.createTextNode(" " + kind + ": " + message));
  }}
}})();
"#,
        literal = script_literal(behavior)
    )
}

/// Encode `source` as a JavaScript string literal safe inside `<script>`
fn script_literal(source: &str) -> String {
    serde_json::to_string(source)
        .unwrap_or_else(|_| String::from("\"\""))
        .replace('<', "\\u003c")
}

fn neutralize_style(css: &str) -> String {
    neutralize_closing_tag(&neutralize_closing_tag(css, "style"), "script").into_owned()
}

/// Rewrite `</tag` (any case) to `<\/tag`
#[must_use]
pub fn neutralize_closing_tag<'a>(text: &'a str, tag: &str) -> Cow<'a, str> {
    let mut out = String::new();
    let mut last = 0;

    for (i, _) in text.match_indices("</") {
        let closes = text
            .get(i + 2..i + 2 + tag.len())
            .is_some_and(|name| name.eq_ignore_ascii_case(tag));
        if closes {
            out.push_str(&text[last..i]);
            out.push_str("<\\/");
            last = i + 2;
        }
    }

    if last == 0 {
        Cow::Borrowed(text)
    } else {
        out.push_str(&text[last..]);
        Cow::Owned(out)
    }
}

/// Escape text for element content
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape text for a double-quoted attribute value
#[must_use]
pub fn escape_attribute(text: &str) -> String {
    escape_html(text)
}
