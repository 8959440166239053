//! # mla-formatter
//!
//! Formats structured academic-paper data into MLA-styled HTML documents.
//!
//! ## Features
//!
//! - **Heading and title**: the four-line MLA heading and a centered title
//! - **Paragraphs**: whitespace-normalized, HTML-escaped body text
//! - **Works Cited**: book, journal and website entries with MLA punctuation
//! - **Tables**: numbered `Table N` tables, memoized per generator
//! - **Block quotes**: short and long (more than 40 words) quote styling
//! - **Templates**: named required-field sets (`mla`, `essay`, `research`)
//! - **Styles**: CSS derived from page settings plus named style variants
//! - **Export**: save to an `.html` file or hand off to a PDF renderer
//!
//! ## Quick Start
//!
//! ```rust
//! use mla_formatter::{CitationRecord, DocumentInput, MlaGenerator};
//!
//! let input = DocumentInput {
//!     header: vec![
//!         "Jane Doe".into(),
//!         "Professor Smith".into(),
//!         "English 101".into(),
//!         "12 March 2024".into(),
//!     ],
//!     title: "The River in American Fiction".into(),
//!     content: vec!["Rivers carry meaning in American novels.".into()],
//!     citations: vec![CitationRecord::Book {
//!         author: "Twain, Mark".into(),
//!         title: "Life on the Mississippi".into(),
//!         publisher: "James R. Osgood".into(),
//!         year: "1883".into(),
//!     }],
//!     ..Default::default()
//! };
//!
//! let mut generator = MlaGenerator::new();
//! let html = generator.generate_html(&input).unwrap();
//! assert!(html.contains("<h2>Works Cited</h2>"));
//! ```
//!
//! ## Output Classes
//!
//! The generated body uses these class names: `header`, `title`, `content`,
//! `paragraph`, `works-cited`, `citation`, `mla-table`, `mla-block-quote` and
//! `mla-block-quote-long`.
//!
//! ## Configuration
//!
//! A [`GeneratorConfig`] can be loaded from TOML to set page settings, the
//! default template, extra templates and named styles. See the `config`
//! module documentation for the format.
//!
//! ## Features
//!
//! - `wasm`: Enable WebAssembly bindings (requires `wasm-bindgen`)

pub mod builders;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod format;
pub mod generator;
pub mod style;
pub mod template;

// WASM module (only with feature)
#[cfg(feature = "wasm")]
pub mod wasm;

// Convenience re-exports
pub use builders::{QuoteBuilder, QuoteResult, TableBuilder, TableResult};
pub use config::GeneratorConfig;
pub use document::{
    CitationRecord, DocumentInput, FormattedDocument, LineSpacing, Margins, PaperSettings,
    QuoteInput, SourceType, TableInput,
};
pub use error::{Error, ExportError, Result, ValidationError};
pub use export::{Exporter, FileExporter, PageSize, PdfExporter, PdfOptions, PdfRenderer};
pub use format::{escape_html, format_citation};
pub use generator::{generate_html, MlaGenerator};
pub use style::{Style, StyleRegistry};
pub use template::{Template, TemplateRegistry};

/// Generate a document and save it as an HTML file in `dir`.
///
/// This is a convenience function that combines [`generate_html`] and
/// [`FileExporter`].
pub fn render_to_file(
    input: &DocumentInput,
    dir: impl AsRef<std::path::Path>,
    filename: &str,
) -> Result<export::ExportOutcome> {
    let html = generate_html(input)?;
    FileExporter::new(dir.as_ref()).export(&html, filename)
}
