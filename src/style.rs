//! Style registry: static MLA style blocks and named style variants.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::PaperSettings;
use crate::error::{Error, Result};

/// Property names accepted by [`StyleRegistry::set_style`].
pub const STYLE_PROPERTIES: [&str; 4] = ["font", "fontSize", "lineHeight", "margins"];

/// Name of the style every lookup falls back to.
pub const DEFAULT_STYLE: &str = "default";

/// Static style blocks, emitted in this order.
const STYLE_BLOCKS: [&str; 7] = [
    // base
    r#"body {
  font-family: var(--font-family);
  font-size: var(--font-size);
  line-height: var(--line-height);
  margin: var(--margin);
}"#,
    // header
    r#".header {
  text-align: left;
  margin-bottom: 2em;
}"#,
    // title
    r#".title {
  text-align: center;
  margin-bottom: 2em;
}"#,
    // content
    r#".paragraph {
  text-indent: 0.5in;
  margin-bottom: 1em;
}"#,
    // citation
    r#".works-cited {
  margin-top: 2em;
  page-break-before: always;
}
.works-cited h2 {
  text-align: center;
  margin-bottom: 1em;
}
.citation {
  padding-left: 0.5in;
  text-indent: -0.5in;
  margin-bottom: 1em;
}"#,
    // table
    r#".mla-table-container {
  margin: 1em 0;
}
.mla-table {
  border-collapse: collapse;
  margin: 0 auto;
}
.mla-table caption {
  caption-side: top;
  text-align: left;
  margin-bottom: 0.5em;
}
.mla-table th, .mla-table td {
  border-top: 1px solid #000;
  border-bottom: 1px solid #000;
  padding: 0.25em 0.75em;
}"#,
    // quote
    r#".mla-block-quote {
  margin: 1em 0;
}
.mla-block-quote-long {
  margin: 1em 0 1em 0.5in;
}
.mla-block-quote p, .mla-block-quote-long p {
  text-indent: 0;
  margin: 0;
}"#,
];

/// Characters that would let a value escape its declaration or the
/// surrounding `<style>` element.
const CSS_FORBIDDEN: [char; 5] = ['<', '>', '{', '}', ';'];

fn is_safe_css_value(value: &str) -> bool {
    !value.contains(&CSS_FORBIDDEN[..])
}

/// Reject page settings whose values cannot be emitted as CSS.
///
/// Every offending field is reported.
pub fn check_paper_settings(settings: &PaperSettings) -> Result<()> {
    let margins = &settings.margins;
    let invalid: Vec<String> = [
        ("font_family", &settings.font_family),
        ("font_size", &settings.font_size),
        ("margins.top", &margins.top),
        ("margins.right", &margins.right),
        ("margins.bottom", &margins.bottom),
        ("margins.left", &margins.left),
    ]
    .into_iter()
    .filter(|(_, value)| !is_safe_css_value(value))
    .map(|(name, _)| name.to_string())
    .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidProperty(invalid))
    }
}

/// A named style variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub font: String,
    pub font_size: String,
    pub line_height: String,
    pub margins: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font: "Times New Roman".to_string(),
            font_size: "12pt".to_string(),
            line_height: "2".to_string(),
            margins: "1in".to_string(),
        }
    }
}

/// CSS custom properties derived from page settings.
pub fn css_variables(settings: &PaperSettings) -> String {
    format!(
        ":root {{\n  --font-family: {};\n  --font-size: {};\n  --line-height: {};\n  --margin: {};\n}}",
        settings.font_family,
        settings.font_size,
        settings.line_spacing.line_height(),
        settings.margins.shorthand()
    )
}

/// Registry of named style variants.
///
/// The default style lives outside the map so lookups always have something
/// to fall back to. Registering a style named `default` replaces it.
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    default: Style,
    styles: BTreeMap<String, Style>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `overrides` merged over the default style under `name`.
    ///
    /// Fails without storing anything if any key is not one of
    /// [`STYLE_PROPERTIES`] or any value contains `<`, `>`, `{`, `}` or `;`.
    /// Every offending key is reported.
    pub fn set_style<I, K, V>(&mut self, name: &str, overrides: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut style = self.default.clone();
        let mut invalid = Vec::new();

        for (key, value) in overrides {
            let key = key.into();
            let value = value.into();
            let slot = match key.as_str() {
                "font" => &mut style.font,
                "fontSize" => &mut style.font_size,
                "lineHeight" => &mut style.line_height,
                "margins" => &mut style.margins,
                _ => {
                    invalid.push(key);
                    continue;
                }
            };
            if is_safe_css_value(&value) {
                *slot = value;
            } else {
                invalid.push(key);
            }
        }
        if !invalid.is_empty() {
            return Err(Error::InvalidProperty(invalid));
        }

        debug!(name, ?style, "registered style");
        if name == DEFAULT_STYLE {
            self.default = style;
        } else {
            self.styles.insert(name.to_string(), style);
        }
        Ok(())
    }

    /// Look up a style, falling back to the default for unknown names.
    pub fn get_style(&self, name: &str) -> &Style {
        self.styles.get(name).unwrap_or(&self.default)
    }

    pub fn has_style(&self, name: &str) -> bool {
        name == DEFAULT_STYLE || self.styles.contains_key(name)
    }

    /// `.mla-document` rule for a named style.
    pub fn generate_css(&self, name: &str) -> String {
        let style = self.get_style(name);
        format!(
            ".mla-document {{\n  font-family: {};\n  font-size: {};\n  line-height: {};\n  margin: {};\n}}",
            style.font, style.font_size, style.line_height, style.margins
        )
    }

    /// CSS variables for `settings` followed by every static style block.
    pub fn generate_styles(&self, settings: &PaperSettings) -> String {
        let mut css = css_variables(settings);
        for block in STYLE_BLOCKS {
            css.push('\n');
            css.push_str(block);
        }
        css
    }
}
