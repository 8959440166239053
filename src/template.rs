//! Named document templates and input validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::document::DocumentInput;
use crate::error::{Error, Result, ValidationError};

/// Number of heading lines an MLA header must have.
pub const HEADER_LINES: usize = 4;

/// Template used by [`crate::MlaGenerator::generate_html`] unless configured otherwise.
pub const DEFAULT_TEMPLATE: &str = "mla";

/// Required top-level fields and the expected section order of a document kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Section names in the order they are expected to appear.
    #[serde(default)]
    pub sections: Vec<String>,
    /// Top-level input fields that must be present.
    pub required: Vec<String>,
}

impl Template {
    pub fn new<S: Into<String>>(
        sections: impl IntoIterator<Item = S>,
        required: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            sections: sections.into_iter().map(Into::into).collect(),
            required: required.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, Template>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        let mut templates = BTreeMap::new();
        templates.insert(
            DEFAULT_TEMPLATE.to_string(),
            Template::new(
                ["Header", "Title", "Content", "Works Cited"],
                ["header", "title", "content"],
            ),
        );
        templates.insert(
            "essay".to_string(),
            Template::new(["Introduction", "Body", "Conclusion"], ["title", "content"]),
        );
        templates.insert(
            "research".to_string(),
            Template::new(
                ["Abstract", "Introduction", "Methodology", "Results", "Discussion"],
                ["title", "abstract", "content"],
            ),
        );
        Self { templates }
    }
}

impl TemplateRegistry {
    /// A registry holding the built-in `mla`, `essay` and `research` templates.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_template(&self, name: &str) -> Result<&Template> {
        self.templates
            .get(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    pub fn add_template(&mut self, name: &str, template: Template) -> Result<()> {
        if self.templates.contains_key(name) {
            return Err(Error::DuplicateTemplate(name.to_string()));
        }
        self.templates.insert(name.to_string(), template);
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Check `input` against the named template without modifying it.
    ///
    /// All missing required fields are collected before failing. When the
    /// header is present, its shape is checked as well. Content must contain
    /// at least one non-blank paragraph under every template.
    pub fn validate(&self, name: &str, input: &DocumentInput) -> Result<()> {
        let template = self.get_template(name)?;
        let mut error = ValidationError::default();

        for field in &template.required {
            if !input.has_field(field) {
                error.missing.push(field.clone());
            }
        }

        if input.has_field("header") && input.header.len() != HEADER_LINES {
            error.violations.push(format!(
                "Header must have {} elements: [studentName, professorName, courseName, date] (got {})",
                HEADER_LINES,
                input.header.len()
            ));
        }

        // Every document needs body text, whatever the template requires.
        let no_content = input.content.iter().all(|p| p.trim().is_empty());
        if no_content && !error.is_missing("content") {
            error
                .violations
                .push("Content must be a non-empty array of paragraphs".to_string());
        }

        if error.is_empty() {
            Ok(())
        } else {
            warn!(template = name, %error, "document failed validation");
            Err(error.into())
        }
    }
}
