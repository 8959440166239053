//! WebAssembly bindings for JavaScript/TypeScript.
//!
//! # Usage (JavaScript/TypeScript)
//!
//! ```javascript
//! import init, { generateHtml, MlaDocumentGenerator } from '@mla-formatter/wasm';
//!
//! await init();
//!
//! // One-off document with default settings
//! const html = generateHtml({
//!   header: ['Jane Doe', 'Professor Smith', 'English 101', '12 March 2024'],
//!   title: 'The River in American Fiction',
//!   content: ['Rivers carry meaning.'],
//!   citations: [{ type: 'book', author: 'Twain, Mark', title: 'Life on the Mississippi' }],
//! });
//!
//! // A generator keeps table numbering and caches between calls
//! const generator = new MlaDocumentGenerator();
//! const table = generator.createTable({ headers: ['Year'], rows: [['1883']], caption: 'Dates' });
//! console.log(table.reference); // "Table 1"
//! ```
//!
//! Saving the returned HTML (as a download or through a PDF library) is left
//! to the JavaScript side.

#![cfg(feature = "wasm")]

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::config::GeneratorConfig;
use crate::document::{CitationRecord, DocumentInput, QuoteInput, TableInput};
use crate::error::Error;
use crate::generator::MlaGenerator;
use crate::template::DEFAULT_TEMPLATE;

// Initialize panic hook for better error messages in console
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn js_error(e: Error) -> JsError {
    JsError::new(&e.to_string())
}

fn from_js<T: for<'de> Deserialize<'de>>(value: JsValue, what: &str) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsError::new(&format!("Invalid {}: {}", what, e)))
}

/// Read a document through a JSON value so citation tags are checked the
/// same way as [`DocumentInput::from_json`].
fn document_from_js(value: JsValue) -> Result<DocumentInput, JsError> {
    let value: serde_json::Value = from_js(value, "document")?;
    DocumentInput::from_value(value).map_err(js_error)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

// ============================================================================
// Main API Functions
// ============================================================================

/// Generate a complete MLA HTML document from a document object.
#[wasm_bindgen(js_name = generateHtml)]
pub fn generate_html(input: JsValue) -> Result<String, JsError> {
    let input = document_from_js(input)?;
    crate::generator::generate_html(&input).map_err(js_error)
}

/// Format one Works Cited entry from a citation object (`{ type: "book", ... }`).
#[wasm_bindgen(js_name = formatCitation)]
pub fn format_citation(record: JsValue) -> Result<String, JsError> {
    let record: serde_json::Value = from_js(record, "citation")?;
    let record = CitationRecord::from_value(record).map_err(js_error)?;
    Ok(crate::format::format_citation(&record))
}

/// Format one Works Cited entry from a type name and its ordered fields.
#[wasm_bindgen(js_name = formatCitationFields)]
pub fn format_citation_fields(kind: &str, fields: Vec<String>) -> Result<String, JsError> {
    let record = CitationRecord::from_fields(kind, &fields).map_err(js_error)?;
    Ok(crate::format::format_citation(&record))
}

/// Validate a document against a named template without rendering.
#[wasm_bindgen(js_name = validateDocument)]
pub fn validate_document(template: Option<String>, input: JsValue) -> Result<JsValue, JsError> {
    let input = document_from_js(input)?;
    let generator = MlaGenerator::new();
    let template = template.as_deref().unwrap_or(DEFAULT_TEMPLATE);

    let result = match generator.templates().validate(template, &input) {
        Ok(()) => ValidationResult {
            valid: true,
            missing: vec![],
            errors: vec![],
        },
        Err(Error::Validation(e)) => ValidationResult {
            valid: false,
            missing: e.missing,
            errors: e.violations,
        },
        Err(e) => return Err(js_error(e)),
    };

    to_js(&result)
}

/// Get the library version.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// ============================================================================
// Stateful Generator
// ============================================================================

/// A generator whose table numbering and caches live as long as the JS object.
#[wasm_bindgen]
pub struct MlaDocumentGenerator {
    inner: MlaGenerator,
}

#[wasm_bindgen]
impl MlaDocumentGenerator {
    /// Create a generator with default MLA settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: MlaGenerator::new(),
        }
    }

    /// Create a generator from a TOML configuration string.
    #[wasm_bindgen(js_name = fromToml)]
    pub fn from_toml(config: &str) -> Result<MlaDocumentGenerator, JsError> {
        let config = GeneratorConfig::from_toml_str(config).map_err(js_error)?;
        let inner = MlaGenerator::from_config(&config).map_err(js_error)?;
        Ok(Self { inner })
    }

    #[wasm_bindgen(js_name = generateHtml)]
    pub fn generate_html(&mut self, input: JsValue) -> Result<String, JsError> {
        let input = document_from_js(input)?;
        self.inner.generate_html(&input).map_err(js_error)
    }

    #[wasm_bindgen(js_name = generateHtmlWithTemplate)]
    pub fn generate_html_with_template(
        &mut self,
        template: &str,
        input: JsValue,
    ) -> Result<String, JsError> {
        let input = document_from_js(input)?;
        self.inner
            .generate_html_with_template(template, &input)
            .map_err(js_error)
    }

    /// Render a table; returns `{ id, number, html, caption, reference }`.
    #[wasm_bindgen(js_name = createTable)]
    pub fn create_table(&mut self, input: JsValue) -> Result<JsValue, JsError> {
        let input: TableInput = from_js(input, "table")?;
        let table = self.inner.create_table(&input).map_err(js_error)?;
        to_js(&table)
    }

    /// Render a block quote; returns `{ html, is_long_quote, word_count, citation }`.
    #[wasm_bindgen(js_name = formatBlockQuote)]
    pub fn format_block_quote(&mut self, input: JsValue) -> Result<JsValue, JsError> {
        let input: QuoteInput = from_js(input, "quote")?;
        let quote = self.inner.format_block_quote(&input).map_err(js_error)?;
        to_js(&quote)
    }

    /// Register a named style variant, e.g. `{ fontSize: "11pt" }`.
    #[wasm_bindgen(js_name = setStyle)]
    pub fn set_style(&mut self, name: &str, overrides: JsValue) -> Result<(), JsError> {
        let overrides: std::collections::BTreeMap<String, String> =
            from_js(overrides, "style properties")?;
        self.inner
            .styles_mut()
            .set_style(name, overrides)
            .map_err(js_error)
    }

    /// Select the style appended as the `.mla-document` rule.
    #[wasm_bindgen(js_name = useStyle)]
    pub fn use_style(&mut self, name: Option<String>) {
        self.inner.set_style(name.as_deref());
    }

    #[wasm_bindgen(js_name = setTemplate)]
    pub fn set_template(&mut self, name: &str) -> Result<(), JsError> {
        self.inner.set_template(name).map_err(js_error)
    }
}

impl Default for MlaDocumentGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Serializable Types for JS Interop
// ============================================================================

#[derive(Serialize, Deserialize)]
struct ValidationResult {
    valid: bool,
    missing: Vec<String>,
    errors: Vec<String>,
}
