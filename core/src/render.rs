//! HTML fragments for the result container.
//!
//! Every piece of text that ends up in markup goes through [`markup`] with an
//! explicit [`Trust`]: the server's `error` field is inserted as-is, all
//! cookie and header data is escaped.

use std::borrow::Cow;

use crate::types::{Cookie, Header, InspectionResult};

/// Class attribute of the wrapper around a successful result.
pub const SUCCESS_CLASS: &str = "success_result alert alert-light";
/// Class attribute of the one-shot "Show headers" link.
pub const SHOW_HEADERS_CLASS: &str = "link-secondary show_headers";
/// Class attribute of the initially hidden headers block.
pub const HEADERS_TABLE_CLASS: &str = "headers_result hidden";

pub const NO_COOKIES_MESSAGE: &str = "No cookies were found in the response";

/// Whether text may be inserted into markup verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trust {
    /// Server-controlled text that is allowed to carry markup.
    Trusted,
    Escaped,
}

/// Replace `& < > " '` with entities, in that order.
pub fn escape_html(unsafe_text: &str) -> String {
    unsafe_text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

pub fn markup(text: &str, trust: Trust) -> Cow<'_, str> {
    match trust {
        Trust::Trusted => Cow::Borrowed(text),
        Trust::Escaped => Cow::Owned(escape_html(text)),
    }
}

/// Danger block for an application-level failure reported by the server.
pub fn render_failure(error: &str) -> String {
    danger_block("alert alert-danger result_error", &markup(error, Trust::Trusted))
}

/// Danger block for a failure on the way to or from the server.
pub fn render_transport_failure(detail: Option<&str>, fallback: &str) -> String {
    let text = detail.filter(|d| !d.is_empty()).unwrap_or(fallback);
    danger_block("alert alert-danger", &markup(text, Trust::Escaped))
}

fn danger_block(class: &str, inner: &str) -> String {
    format!("<div class=\"{class}\" role=\"alert\">{inner}</div>")
}

/// Status, cookies and (when present) the collapsed headers block.
pub fn render_success(result: &InspectionResult) -> String {
    let mut html = format!("<div class=\"{SUCCESS_CLASS}\">");
    html.push_str(&status_table(&result.status));
    html.push_str(&cookies_block(&result.cookies));
    if !result.headers.is_empty() {
        html.push_str(&headers_block(&result.headers));
    }
    html.push_str("</div>");
    html
}

fn status_table(status: &str) -> String {
    format!(
        "<table class=\"table\"><tr><td><span class=\"badge text-bg-light\">Status</span></td>\
         <td><code>{}</code></td></tr></table>",
        markup(status, Trust::Escaped)
    )
}

fn table_open() -> &'static str {
    "<div class=\"table-responsive\"><table class=\"table\"><thead><tr>\
     <th scope=\"col\">Name</th><th scope=\"col\">Value</th></tr></thead>\
     <tbody class=\"table-group-divider\">"
}

fn table_close() -> &'static str {
    "</tbody></table></div>"
}

fn name_cell(name: &str) -> String {
    format!(
        "<td><span class=\"badge text-bg-light\">{}</span></td>",
        markup(name, Trust::Escaped)
    )
}

fn cookies_block(cookies: &[Cookie]) -> String {
    if cookies.is_empty() {
        return format!("<p>{NO_COOKIES_MESSAGE}</p>");
    }

    let mut html = String::from("<h4>Cookies</h4>");
    html.push_str(table_open());
    for cookie in cookies {
        html.push_str("<tr>");
        html.push_str(&name_cell(&cookie.name));
        html.push_str(&format!("<td><code>{}</code></td>", markup(&cookie.value, Trust::Escaped)));
        html.push_str("</tr>");
    }
    html.push_str(table_close());
    html
}

fn headers_block(headers: &[Header]) -> String {
    let mut html = format!(
        "<a href=\"#\" class=\"{SHOW_HEADERS_CLASS}\">Show headers</a>\
         <div class=\"{HEADERS_TABLE_CLASS}\"><h4>Headers</h4>"
    );
    html.push_str(table_open());
    for header in headers {
        html.push_str("<tr>");
        html.push_str(&name_cell(&header.name));
        html.push_str("<td>");
        for value in &header.values {
            html.push_str(&format!("<div><code>{}</code></div>", markup(value, Trust::Escaped)));
        }
        html.push_str("</td></tr>");
    }
    html.push_str(table_close());
    html.push_str("</div>");
    html
}
