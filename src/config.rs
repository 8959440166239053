//! Generator configuration loaded from TOML.
//!
//! ```toml
//! template = "mla"
//! style = "compact"
//!
//! [paper]
//! font_size = "12pt"
//! line_spacing = "double"
//!
//! [styles.compact]
//! fontSize = "11pt"
//!
//! [templates.lab-report]
//! sections = ["Introduction", "Method", "Results"]
//! required = ["title", "content"]
//!
//! [export]
//! page_size = "a4"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::document::PaperSettings;
use crate::error::{Error, Result};
use crate::export::PdfOptions;
use crate::template::{Template, DEFAULT_TEMPLATE};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Template `generate_html` validates against.
    pub template: String,
    /// Named style whose `.mla-document` rule is appended to the styles.
    pub style: Option<String>,
    pub paper: PaperSettings,
    /// Style overrides keyed by style name.
    pub styles: BTreeMap<String, BTreeMap<String, String>>,
    /// Templates added on top of the built-in ones.
    pub templates: BTreeMap<String, Template>,
    pub export: PdfOptions,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            style: None,
            paper: PaperSettings::default(),
            styles: BTreeMap::new(),
            templates: BTreeMap::new(),
            export: PdfOptions::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::LineSpacing;
    use crate::export::PageSize;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = GeneratorConfig::from_toml_str("").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.template, "mla");
        assert_eq!(config.paper.font_size, "12pt");
    }

    #[test]
    fn test_full_config() {
        let config = GeneratorConfig::from_toml_str(
            r#"
template = "essay"
style = "compact"

[paper]
font_family = "Georgia"
line_spacing = "single"

[paper.margins]
left = "1.25in"

[styles.compact]
fontSize = "11pt"

[templates.lab-report]
sections = ["Introduction", "Method", "Results"]
required = ["title", "content"]

[export]
page_size = "a4"
scale = 3.0
"#,
        )
        .unwrap();

        assert_eq!(config.template, "essay");
        assert_eq!(config.style.as_deref(), Some("compact"));
        assert_eq!(config.paper.font_family, "Georgia");
        assert_eq!(config.paper.font_size, "12pt");
        assert_eq!(config.paper.line_spacing, LineSpacing::Single);
        assert_eq!(config.paper.margins.left, "1.25in");
        assert_eq!(config.paper.margins.top, "1in");
        assert_eq!(config.styles["compact"]["fontSize"], "11pt");
        assert_eq!(config.templates["lab-report"].required, vec!["title", "content"]);
        assert_eq!(config.export.page_size, PageSize::A4);
        assert_eq!(config.export.scale, 3.0);
        assert_eq!(config.export.image_quality, 0.98);
    }

    #[test]
    fn test_invalid_config() {
        let err = GeneratorConfig::from_toml_str("paper = 12").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = GeneratorConfig::from_toml_str("colour = \"red\"").unwrap_err();
        assert!(err.to_string().contains("colour"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mla.toml");
        std::fs::write(&path, "template = \"research\"\n").unwrap();

        let config = GeneratorConfig::from_file(&path).unwrap();
        assert_eq!(config.template, "research");

        let missing = GeneratorConfig::from_file(dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(Error::Io(_))));
    }
}
