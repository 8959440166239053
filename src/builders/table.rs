//! Numbered MLA tables.

use serde::Serialize;
use tracing::debug;

use super::cache::{content_key, FragmentCache};
use super::non_blank;
use crate::document::TableInput;
use crate::error::Result;
use crate::format::escape_html;

/// A rendered table and its sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableResult {
    /// Anchor id, `table-N`.
    pub id: String,
    /// Sequence number, starting at 1.
    pub number: u32,
    pub html: String,
    pub caption: Option<String>,
    /// In-text reference label, `Table N`.
    pub reference: String,
}

/// Renders tables, numbering each distinct input in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    count: u32,
    cache: FragmentCache<TableResult>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a table, or return the cached result for an identical input.
    ///
    /// The counter advances only when an input is seen for the first time.
    pub fn create_table(&mut self, input: &TableInput) -> Result<TableResult> {
        let key = content_key(input)?;
        if let Some(hit) = self.cache.get(&key) {
            debug!(id = %hit.id, "table cache hit");
            return Ok(hit);
        }

        self.count += 1;
        let table = TableResult {
            id: format!("table-{}", self.count),
            number: self.count,
            html: render_table(input),
            caption: non_blank(input.caption.as_deref()).map(str::to_string),
            reference: format!("Table {}", self.count),
        };
        debug!(id = %table.id, rows = input.rows.len(), "rendered table");

        self.cache.insert(key, table.clone());
        Ok(table)
    }

    /// Number of distinct tables rendered so far.
    pub fn count(&self) -> u32 {
        self.count
    }
}

fn render_table(input: &TableInput) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"mla-table-container\">\n");
    html.push_str("<table class=\"mla-table\">\n");

    if let Some(caption) = non_blank(input.caption.as_deref()) {
        html.push_str(&format!("<caption>{}</caption>\n", escape_html(caption)));
    }

    html.push_str("<thead><tr>");
    for header in &input.headers {
        html.push_str(&format!("<th>{}</th>", escape_html(header)));
    }
    html.push_str("</tr></thead>\n");

    // Rows are emitted as given; ragged rows are not padded or truncated.
    html.push_str("<tbody>");
    for row in &input.rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", escape_html(cell)));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody>\n");

    html.push_str("</table>\n</div>\n");
    html
}
