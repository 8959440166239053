//! Error types for the mla-formatter library.

use std::fmt;

use thiserror::Error;

/// Result type alias for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported citation type \"{kind}\" (supported: {})", .supported.join(", "))]
    UnsupportedCitationType {
        kind: String,
        supported: Vec<&'static str>,
    },

    #[error("Template \"{0}\" not found")]
    NotFound(String),

    #[error("Template \"{0}\" already exists")]
    DuplicateTemplate(String),

    #[error("Invalid style properties: {}", .0.join(", "))]
    InvalidProperty(Vec<String>),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Every problem found while validating a document input.
///
/// Validation never stops at the first problem: `missing` lists all required
/// fields that are absent and `violations` lists all shape problems
/// (wrong header length, empty content, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    /// Required fields that are absent or blank.
    pub missing: Vec<String>,
    /// Fields that are present but malformed.
    pub violations: Vec<String>,
}

impl ValidationError {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.violations.is_empty()
    }

    /// Returns true if `field` is reported as missing.
    pub fn is_missing(&self, field: &str) -> bool {
        self.missing.iter().any(|m| m == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.missing.is_empty() {
            parts.push(format!("Missing required fields: {}", self.missing.join(", ")));
        }
        parts.extend(self.violations.iter().cloned());
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// A failure reported by an export collaborator, with its original message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ExportError {
    /// Destination that failed (file name or renderer).
    pub target: String,
    pub message: String,
}

impl ExportError {
    pub fn new(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            message: message.into(),
        }
    }
}
