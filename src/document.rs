//! Data model for paper inputs, page settings and formatted output.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result, ValidationError};

fn invalid_input(e: serde_json::Error) -> Error {
    Error::Validation(ValidationError {
        missing: Vec::new(),
        violations: vec![format!("Invalid document input: {}", e)],
    })
}

/// Check a citation's `type` tag and rewrite it to its canonical spelling.
fn normalize_source_type(citation: &mut Value) -> Result<()> {
    if let Some(tag) = citation.get_mut("type") {
        if let Some(kind) = tag.as_str() {
            let source_type: SourceType = kind.parse()?;
            *tag = Value::from(source_type.as_str());
        }
    }
    Ok(())
}

/// A complete paper as handed to the generator.
///
/// Every field defaults to empty so that incomplete input can be represented
/// and reported by validation instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentInput {
    /// Heading lines, in order: student, instructor, course, date.
    pub header: Vec<String>,
    /// Paper title.
    pub title: String,
    /// Body paragraphs.
    pub content: Vec<String>,
    /// Works Cited entries, in output order.
    pub citations: Vec<CitationRecord>,
    /// Tables rendered after the body paragraphs.
    pub tables: Vec<TableInput>,
    /// Block quotes rendered after the body paragraphs.
    pub quotes: Vec<QuoteInput>,
    /// Abstract, required by the `research` template.
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
}

impl DocumentInput {
    /// Parse a document from JSON.
    ///
    /// An unknown citation `type` fails with
    /// [`Error::UnsupportedCitationType`]. Any other malformed input is
    /// reported as a [`ValidationError`] violation.
    pub fn from_json(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input).map_err(invalid_input)?;
        Self::from_value(value)
    }

    /// Build a document from an already parsed JSON value.
    pub fn from_value(mut value: Value) -> Result<Self> {
        if let Some(citations) = value.get_mut("citations").and_then(Value::as_array_mut) {
            for citation in citations {
                normalize_source_type(citation)?;
            }
        }
        serde_json::from_value(value).map_err(invalid_input)
    }

    /// Whether a top-level field is present.
    ///
    /// Strings count as present when not blank, sequences when not empty.
    /// Unknown field names are never present.
    pub fn has_field(&self, field: &str) -> bool {
        match field {
            "header" => !self.header.is_empty(),
            "title" => !self.title.trim().is_empty(),
            "content" => !self.content.is_empty(),
            "citations" => !self.citations.is_empty(),
            "tables" => !self.tables.is_empty(),
            "quotes" => !self.quotes.is_empty(),
            "abstract" => self
                .abstract_text
                .as_deref()
                .is_some_and(|a| !a.trim().is_empty()),
            _ => false,
        }
    }
}

/// A Works Cited source, one variant per supported source type.
///
/// Empty fields are treated as absent by the citation formatter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CitationRecord {
    Book {
        #[serde(default)]
        author: String,
        #[serde(default)]
        title: String,
        #[serde(default)]
        publisher: String,
        #[serde(default)]
        year: String,
    },
    Journal {
        #[serde(default)]
        author: String,
        #[serde(default)]
        title: String,
        #[serde(default)]
        journal: String,
        #[serde(default)]
        volume: String,
        #[serde(default)]
        issue: String,
        #[serde(default)]
        year: String,
        #[serde(default)]
        pages: String,
    },
    Website {
        #[serde(default)]
        author: String,
        #[serde(default)]
        title: String,
        #[serde(default)]
        website: String,
        #[serde(default)]
        publisher: String,
        #[serde(default)]
        date: String,
        #[serde(default)]
        url: String,
    },
}

/// Source type tag of a [`CitationRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceType {
    Book,
    Journal,
    Website,
}

impl SourceType {
    pub const ALL: [SourceType; 3] = [SourceType::Book, SourceType::Journal, SourceType::Website];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Book => "book",
            SourceType::Journal => "journal",
            SourceType::Website => "website",
        }
    }

    /// Names of every supported source type.
    pub fn supported() -> Vec<&'static str> {
        Self::ALL.iter().map(SourceType::as_str).collect()
    }
}

impl std::str::FromStr for SourceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "book" => Ok(SourceType::Book),
            "journal" => Ok(SourceType::Journal),
            "website" => Ok(SourceType::Website),
            _ => Err(Error::UnsupportedCitationType {
                kind: s.to_string(),
                supported: SourceType::supported(),
            }),
        }
    }
}

impl CitationRecord {
    /// Build a record from a type tag and its ordered fields.
    ///
    /// Field order follows the variant declaration; missing trailing fields
    /// are left empty and extra fields are ignored.
    pub fn from_fields<S: AsRef<str>>(kind: &str, fields: &[S]) -> Result<Self> {
        let source_type: SourceType = kind.parse()?;
        let field = |i: usize| {
            fields
                .get(i)
                .map(|f| f.as_ref().to_string())
                .unwrap_or_default()
        };

        Ok(match source_type {
            SourceType::Book => CitationRecord::Book {
                author: field(0),
                title: field(1),
                publisher: field(2),
                year: field(3),
            },
            SourceType::Journal => CitationRecord::Journal {
                author: field(0),
                title: field(1),
                journal: field(2),
                volume: field(3),
                issue: field(4),
                year: field(5),
                pages: field(6),
            },
            SourceType::Website => CitationRecord::Website {
                author: field(0),
                title: field(1),
                website: field(2),
                publisher: field(3),
                date: field(4),
                url: field(5),
            },
        })
    }

    /// Build a record from a JSON object carrying a `type` tag.
    ///
    /// Tags are matched case-insensitively; unknown tags fail with
    /// [`Error::UnsupportedCitationType`].
    pub fn from_value(mut value: Value) -> Result<Self> {
        normalize_source_type(&mut value)?;
        serde_json::from_value(value).map_err(invalid_input)
    }

    pub fn source_type(&self) -> SourceType {
        match self {
            CitationRecord::Book { .. } => SourceType::Book,
            CitationRecord::Journal { .. } => SourceType::Journal,
            CitationRecord::Website { .. } => SourceType::Website,
        }
    }
}

/// A table to be numbered and rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TableInput {
    pub headers: Vec<String>,
    /// Body rows. Rows are rendered as given, even when their length differs
    /// from the header row.
    pub rows: Vec<Vec<String>>,
    pub caption: Option<String>,
}

/// A quotation rendered as a block quote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteInput {
    pub text: String,
    pub author: Option<String>,
    pub citation: Option<String>,
}

/// Line spacing of the paper body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineSpacing {
    Single,
    #[default]
    Double,
}

impl LineSpacing {
    /// CSS `line-height` value for this spacing.
    pub fn line_height(&self) -> &'static str {
        match self {
            LineSpacing::Double => "2",
            LineSpacing::Single => "1.5",
        }
    }
}

/// Page margins as CSS lengths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: String,
    pub right: String,
    pub bottom: String,
    pub left: String,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: "1in".to_string(),
            right: "1in".to_string(),
            bottom: "1in".to_string(),
            left: "1in".to_string(),
        }
    }
}

impl Margins {
    /// CSS `margin` shorthand, clockwise from the top.
    pub fn shorthand(&self) -> String {
        format!("{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

/// Page settings of a generated paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperSettings {
    pub font_size: String,
    pub font_family: String,
    pub line_spacing: LineSpacing,
    pub margins: Margins,
}

impl Default for PaperSettings {
    fn default() -> Self {
        Self {
            font_size: "12pt".to_string(),
            font_family: "Times New Roman".to_string(),
            line_spacing: LineSpacing::Double,
            margins: Margins::default(),
        }
    }
}

/// Output of the formatting step, before HTML assembly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedDocument {
    /// Heading lines joined by newlines.
    pub header: String,
    pub title: String,
    pub content: Vec<String>,
    pub citations: Vec<String>,
    pub settings: PaperSettings,
}
