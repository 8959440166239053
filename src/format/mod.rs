//! Field formatters: text normalization and HTML fragments for single fields.
//!
//! The `format_*` functions normalize plain text. The `*_fragment` functions
//! wrap normalized text in the markup the assembled document uses, escaping
//! every interpolated value.

pub mod citation;

pub use citation::format_citation;

/// Escape the characters that are significant in HTML text and attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Join the four heading lines with newlines, in the given order.
pub fn format_header<S: AsRef<str>>(lines: &[S; 4]) -> String {
    lines
        .iter()
        .map(|line| line.as_ref())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Trim leading and trailing whitespace, leaving the rest untouched.
pub fn format_title(title: &str) -> String {
    title.trim().to_string()
}

/// Collapse every whitespace run to a single space and trim.
pub fn format_paragraph(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Header block: one escaped line per heading line, separated by `<br>`.
pub fn header_fragment(header: &str) -> String {
    let lines: Vec<String> = header.split('\n').map(escape_html).collect();
    format!("<div class=\"header\">\n{}\n</div>\n", lines.join("<br>\n"))
}

pub fn title_fragment(title: &str) -> String {
    format!("<div class=\"title\">{}</div>\n", escape_html(title))
}

pub fn paragraph_fragment(paragraph: &str) -> String {
    format!("<div class=\"paragraph\">{}</div>\n", escape_html(paragraph))
}
