//! Export of finished documents to files and PDF renderers.
//!
//! The generator only produces HTML. Exporters hand that string to the
//! outside world: [`FileExporter`] saves it as an `.html` file and
//! [`PdfExporter`] forwards it, with page options, to a [`PdfRenderer`]
//! supplied by the caller. Failures are wrapped in [`ExportError`] with the
//! collaborator's message and are never retried.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::GeneratorConfig;
use crate::document::Margins;
use crate::error::{ExportError, Result};

/// File name [`FileExporter`] uses when the caller does not supply one.
pub const DEFAULT_FILENAME: &str = "mla-document.html";

/// File name [`PdfExporter`] uses when the caller does not supply one.
pub const DEFAULT_PDF_FILENAME: &str = "mla-document.pdf";

/// Paper size handed to the PDF renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    Letter,
    Legal,
    A4,
}

impl PageSize {
    /// Width and height in inches.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::Letter => (8.5, 11.0),
            PageSize::Legal => (8.5, 14.0),
            PageSize::A4 => (8.27, 11.69),
        }
    }
}

/// Options forwarded unchanged to the PDF renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfOptions {
    pub page_size: PageSize,
    pub margins: Margins,
    /// JPEG quality for rasterized content, 0.0 to 1.0.
    pub image_quality: f32,
    /// Canvas scale factor used when rasterizing.
    pub scale: f32,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::Letter,
            margins: Margins::default(),
            image_quality: 0.98,
            scale: 2.0,
        }
    }
}

/// Where an export ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub filename: String,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Destination for a finished HTML document.
pub trait Exporter {
    fn export(&self, html: &str, filename: &str) -> Result<ExportOutcome>;
}

/// Converts HTML to PDF bytes.
pub trait PdfRenderer {
    fn render(
        &self,
        html: &str,
        options: &PdfOptions,
    ) -> std::result::Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Pick the file name to write, falling back to `default` when blank.
///
/// Only a bare file name is accepted so exports stay inside the exporter's
/// directory.
fn resolve_filename(filename: &str, default: &str) -> Result<String> {
    let filename = filename.trim();
    if filename.is_empty() {
        return Ok(default.to_string());
    }

    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(filename.to_string()),
        _ => Err(ExportError::new(filename, format!("Invalid file name: {}", filename)).into()),
    }
}

fn write_file(dir: &Path, filename: &str, bytes: &[u8]) -> Result<ExportOutcome> {
    let path = dir.join(filename);
    std::fs::write(&path, bytes).map_err(|e| {
        warn!(path = %path.display(), error = %e, "export write failed");
        ExportError::new(filename, format!("Failed to save file: {}", e))
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), "exported document");
    Ok(ExportOutcome {
        filename: filename.to_string(),
        path,
        bytes: bytes.len(),
    })
}

/// Saves HTML documents into a directory.
#[derive(Debug, Clone)]
pub struct FileExporter {
    dir: PathBuf,
}

impl FileExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Exporter for FileExporter {
    fn export(&self, html: &str, filename: &str) -> Result<ExportOutcome> {
        if html.is_empty() {
            return Err(ExportError::new(filename, "HTML content is required").into());
        }
        let filename = resolve_filename(filename, DEFAULT_FILENAME)?;
        write_file(&self.dir, &filename, html.as_bytes())
    }
}

/// Renders HTML through a [`PdfRenderer`] and saves the PDF into a directory.
pub struct PdfExporter<R> {
    renderer: R,
    options: PdfOptions,
    dir: PathBuf,
}

impl<R: PdfRenderer> PdfExporter<R> {
    pub fn new(renderer: R, options: PdfOptions, dir: impl Into<PathBuf>) -> Self {
        Self {
            renderer,
            options,
            dir: dir.into(),
        }
    }

    /// Use the `[export]` options of a generator configuration.
    pub fn from_config(renderer: R, config: &GeneratorConfig, dir: impl Into<PathBuf>) -> Self {
        Self::new(renderer, config.export.clone(), dir)
    }

    pub fn options(&self) -> &PdfOptions {
        &self.options
    }
}

impl<R: PdfRenderer> Exporter for PdfExporter<R> {
    fn export(&self, html: &str, filename: &str) -> Result<ExportOutcome> {
        if html.is_empty() {
            return Err(ExportError::new(filename, "HTML content is required").into());
        }
        let filename = resolve_filename(filename, DEFAULT_PDF_FILENAME)?;

        let (width, height) = self.options.page_size.dimensions();
        debug!(filename = %filename, width, height, "rendering PDF");
        let bytes = self.renderer.render(html, &self.options).map_err(|e| {
            warn!(filename = %filename, error = %e, "PDF renderer failed");
            ExportError::new(filename.as_str(), format!("PDF Export failed: {}", e))
        })?;

        write_file(&self.dir, &filename, &bytes)
    }
}
