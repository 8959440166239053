//! Document assembly: validated input in, complete MLA HTML document out.

use tracing::debug;

use crate::builders::{QuoteBuilder, QuoteResult, TableBuilder, TableResult};
use crate::config::GeneratorConfig;
use crate::document::{
    CitationRecord, DocumentInput, FormattedDocument, PaperSettings, QuoteInput, TableInput,
};
use crate::error::Result;
use crate::format::{
    escape_html, format_citation, format_header, format_paragraph, format_title, header_fragment,
    paragraph_fragment, title_fragment,
};
use crate::style::{check_paper_settings, StyleRegistry};
use crate::template::{TemplateRegistry, DEFAULT_TEMPLATE};

/// Generates MLA documents.
///
/// A generator owns its template and style registries and the table and
/// quote caches. Table numbering and cached fragments persist across calls on
/// the same generator and are never shared between generators. Methods that
/// touch the caches take `&mut self`; wrap the generator in a `Mutex` to
/// share it between threads.
#[derive(Debug, Clone)]
pub struct MlaGenerator {
    settings: PaperSettings,
    templates: TemplateRegistry,
    styles: StyleRegistry,
    tables: TableBuilder,
    quotes: QuoteBuilder,
    template: String,
    style: Option<String>,
}

impl Default for MlaGenerator {
    fn default() -> Self {
        Self::with_settings(PaperSettings::default())
    }
}

impl MlaGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: PaperSettings) -> Self {
        Self {
            settings,
            templates: TemplateRegistry::new(),
            styles: StyleRegistry::new(),
            tables: TableBuilder::new(),
            quotes: QuoteBuilder::new(),
            template: DEFAULT_TEMPLATE.to_string(),
            style: None,
        }
    }

    /// Build a generator from configuration.
    ///
    /// Configured styles and templates go through the registries, so invalid
    /// style keys and duplicate template names fail here. The selected
    /// template must exist and the page settings must be emittable as CSS.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        check_paper_settings(&config.paper)?;
        let mut generator = Self::with_settings(config.paper.clone());

        for (name, overrides) in &config.styles {
            generator.styles.set_style(name, overrides.clone())?;
        }
        for (name, template) in &config.templates {
            generator.templates.add_template(name, template.clone())?;
        }

        generator.templates.get_template(&config.template)?;
        generator.template = config.template.clone();
        generator.style = config.style.clone();
        Ok(generator)
    }

    pub fn settings(&self) -> &PaperSettings {
        &self.settings
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    pub fn templates_mut(&mut self) -> &mut TemplateRegistry {
        &mut self.templates
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut StyleRegistry {
        &mut self.styles
    }

    /// Template used by [`MlaGenerator::generate_html`].
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn set_template(&mut self, name: &str) -> Result<()> {
        self.templates.get_template(name)?;
        self.template = name.to_string();
        Ok(())
    }

    /// Select a named style to append as the `.mla-document` rule.
    pub fn set_style(&mut self, name: Option<&str>) {
        self.style = name.map(str::to_string);
    }

    pub fn format_citation(&self, record: &CitationRecord) -> String {
        format_citation(record)
    }

    pub fn create_table(&mut self, input: &TableInput) -> Result<TableResult> {
        self.tables.create_table(input)
    }

    pub fn format_block_quote(&mut self, input: &QuoteInput) -> Result<QuoteResult> {
        self.quotes.format_block_quote(input)
    }

    /// Validate against the selected template and format every field.
    pub fn create_document(&self, input: &DocumentInput) -> Result<FormattedDocument> {
        self.templates.validate(&self.template, input)?;
        Ok(self.format_document(input))
    }

    /// Generate a complete HTML document using the selected template.
    pub fn generate_html(&mut self, input: &DocumentInput) -> Result<String> {
        let template = self.template.clone();
        self.generate_html_with_template(&template, input)
    }

    /// Generate a complete HTML document, validating against `template`.
    ///
    /// Nothing is returned unless every step succeeds.
    pub fn generate_html_with_template(
        &mut self,
        template: &str,
        input: &DocumentInput,
    ) -> Result<String> {
        debug!(
            template,
            paragraphs = input.content.len(),
            citations = input.citations.len(),
            "generating document"
        );
        check_paper_settings(&self.settings)?;
        self.templates.validate(template, input)?;
        let doc = self.format_document(input);

        let quotes = input
            .quotes
            .iter()
            .map(|q| self.quotes.format_block_quote(q))
            .collect::<Result<Vec<_>>>()?;
        let tables = input
            .tables
            .iter()
            .map(|t| self.tables.create_table(t))
            .collect::<Result<Vec<_>>>()?;

        let mut assembler = Assembler::new(&doc);
        assembler.head(&self.styles_css());
        assembler.body_open();
        if !doc.header.is_empty() {
            assembler.push(&header_fragment(&doc.header));
        }
        assembler.push(&title_fragment(&doc.title));
        let abstract_text = input.abstract_text.as_deref().filter(|a| !a.trim().is_empty());
        if let Some(abstract_text) = abstract_text {
            assembler.abstract_block(&format_paragraph(abstract_text));
        }
        assembler.content(&quotes, &tables);
        assembler.works_cited();
        let html = assembler.finish();

        debug!(
            bytes = html.len(),
            tables = tables.len(),
            quotes = quotes.len(),
            "generated document"
        );
        Ok(html)
    }

    fn styles_css(&self) -> String {
        let mut css = self.styles.generate_styles(&self.settings);
        if let Some(ref style) = self.style {
            if !self.styles.has_style(style) {
                debug!(style = style.as_str(), "unknown style, using default");
            }
            css.push('\n');
            css.push_str(&self.styles.generate_css(style));
        }
        css
    }

    /// Format every field. The input must already be validated.
    ///
    /// Citations whose fields are all empty format to nothing and are dropped.
    fn format_document(&self, input: &DocumentInput) -> FormattedDocument {
        let header = <&[String; 4]>::try_from(input.header.as_slice())
            .map(|lines| format_header(lines))
            .unwrap_or_default();

        FormattedDocument {
            header,
            title: format_title(&input.title),
            content: input.content.iter().map(|p| format_paragraph(p)).collect(),
            citations: input
                .citations
                .iter()
                .map(format_citation)
                .filter(|c| !c.is_empty())
                .collect(),
            settings: self.settings.clone(),
        }
    }
}

/// Generate a document with a fresh generator and default settings.
pub fn generate_html(input: &DocumentInput) -> Result<String> {
    MlaGenerator::new().generate_html(input)
}

/// Accumulates the output document in section order.
struct Assembler<'a> {
    doc: &'a FormattedDocument,
    output: String,
}

impl<'a> Assembler<'a> {
    fn new(doc: &'a FormattedDocument) -> Self {
        Self {
            doc,
            output: String::new(),
        }
    }

    fn push(&mut self, fragment: &str) {
        self.output.push_str(fragment);
    }

    fn head(&mut self, css: &str) {
        self.output.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        self.output.push_str("<meta charset=\"UTF-8\">\n");
        self.output.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        self.output
            .push_str(&format!("<title>{}</title>\n", escape_html(&self.doc.title)));
        self.output.push_str("<style>\n");
        self.output.push_str(css);
        self.output.push_str("\n</style>\n</head>\n");
    }

    fn body_open(&mut self) {
        self.output.push_str("<body class=\"mla-document\">\n");
    }

    fn abstract_block(&mut self, text: &str) {
        self.output.push_str("<div class=\"abstract\">\n<h2>Abstract</h2>\n");
        self.output.push_str(&paragraph_fragment(text));
        self.output.push_str("</div>\n");
    }

    fn content(&mut self, quotes: &[QuoteResult], tables: &[TableResult]) {
        self.output.push_str("<div class=\"content\">\n");
        for paragraph in &self.doc.content {
            self.output.push_str(&paragraph_fragment(paragraph));
        }
        for quote in quotes {
            self.output.push_str(&quote.html);
        }
        for table in tables {
            self.output.push_str(&table.html);
        }
        self.output.push_str("</div>\n");
    }

    fn works_cited(&mut self) {
        if self.doc.citations.is_empty() {
            return;
        }

        self.output.push_str("<div class=\"works-cited\">\n<h2>Works Cited</h2>\n");
        for citation in &self.doc.citations {
            self.output.push_str(&format!(
                "<div class=\"citation\">{}</div>\n",
                escape_html(citation)
            ));
        }
        self.output.push_str("</div>\n");
    }

    fn finish(mut self) -> String {
        self.output.push_str("</body>\n</html>\n");
        self.output
    }
}
