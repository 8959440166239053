//! Works Cited entry formatting.
//!
//! Each source type has a fixed template made of *units*. A unit is either a
//! plain run of components joined by `", "` and closed with a period, or a
//! quoted title closed inside the quotes. Empty components are dropped along
//! with their separator, and a unit with no components is dropped entirely.
//!
//! | Type    | Template                                                        |
//! |---------|-----------------------------------------------------------------|
//! | book    | `Author. Title. Publisher, Year.`                               |
//! | journal | `Author. "Title." Journal, vol. V, no. I, Year, pp. Pages.`     |
//! | website | `Author. "Title." Website, Publisher, Date, URL.`               |

use tracing::trace;

use crate::document::CitationRecord;

enum Unit {
    Plain(Vec<String>),
    Quoted(String),
}

impl Unit {
    fn plain<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Unit::Plain(
            components
                .into_iter()
                .map(|c| c.as_ref().trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
        )
    }

    fn quoted(title: &str) -> Self {
        Unit::Quoted(title.trim().to_string())
    }

    fn render(&self) -> Option<String> {
        match self {
            Unit::Plain(parts) if parts.is_empty() => None,
            Unit::Plain(parts) => Some(format!("{}.", parts.join(", "))),
            Unit::Quoted(title) if title.is_empty() => None,
            Unit::Quoted(title) => Some(format!("\"{}.\"", title)),
        }
    }
}

/// Prefix a value with its label, or yield nothing when the value is empty.
fn labeled(label: &str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        String::new()
    } else {
        format!("{} {}", label, value)
    }
}

/// Format a citation record as a plain-text Works Cited entry.
///
/// The output is not HTML-escaped; the document assembler escapes it when
/// embedding.
pub fn format_citation(record: &CitationRecord) -> String {
    let units = match record {
        CitationRecord::Book {
            author,
            title,
            publisher,
            year,
        } => vec![
            Unit::plain([author]),
            Unit::plain([title]),
            Unit::plain([publisher, year]),
        ],
        CitationRecord::Journal {
            author,
            title,
            journal,
            volume,
            issue,
            year,
            pages,
        } => vec![
            Unit::plain([author]),
            Unit::quoted(title),
            Unit::plain([
                journal.clone(),
                labeled("vol.", volume),
                labeled("no.", issue),
                year.clone(),
                labeled("pp.", pages),
            ]),
        ],
        CitationRecord::Website {
            author,
            title,
            website,
            publisher,
            date,
            url,
        } => vec![
            Unit::plain([author]),
            Unit::quoted(title),
            Unit::plain([website, publisher, date, url]),
        ],
    };

    let citation = units
        .iter()
        .filter_map(Unit::render)
        .collect::<Vec<_>>()
        .join(" ");

    trace!(kind = record.source_type().as_str(), %citation, "formatted citation");
    citation
}
