//! Glyph sources.
//!
//! The layout pipeline does not decode documents itself; it asks a
//! [`GlyphSource`] for each page's glyphs, one page at a time and strictly in
//! page order.
//!
//! # Sources
//!
//! | Source | Input | Feature Flag |
//! |--------|-------|-------------|
//! | [`MemorySource`] | glyphs already in memory | always |
//! | [`JsonSource`] | JSON glyph dump on disk | always |
//! | [`PdfiumSource`] | PDF file via pdfium | `pdf` |

pub mod json;
#[cfg(feature = "pdf")]
pub mod pdf;

use std::path::Path;

use async_trait::async_trait;

use crate::error::{Result, TariffError};
use crate::glyph::{Glyph, GlyphDocument};

pub use json::JsonSource;
#[cfg(feature = "pdf")]
pub use pdf::PdfiumSource;

/// Supplies positioned glyphs for one document.
///
/// Page extraction may suspend (file or FFI work); callers await each page
/// before asking for the next.
#[async_trait]
pub trait GlyphSource: Send + Sync {
    /// Human-readable name used in logs and errors (usually a file path).
    fn label(&self) -> &str;

    async fn page_count(&self) -> Result<usize>;

    /// Glyphs of page `index` (0-based), in any order.
    async fn page(&self, index: usize) -> Result<Vec<Glyph>>;
}

/// Pages held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    label: String,
    pages: Vec<Vec<Glyph>>,
}

impl MemorySource {
    pub fn new(label: impl Into<String>, pages: Vec<Vec<Glyph>>) -> Self {
        Self {
            label: label.into(),
            pages,
        }
    }
}

impl From<GlyphDocument> for MemorySource {
    fn from(doc: GlyphDocument) -> Self {
        Self::new("<memory>", doc.pages)
    }
}

#[async_trait]
impl GlyphSource for MemorySource {
    fn label(&self) -> &str {
        &self.label
    }

    async fn page_count(&self) -> Result<usize> {
        Ok(self.pages.len())
    }

    async fn page(&self, index: usize) -> Result<Vec<Glyph>> {
        self.pages
            .get(index)
            .cloned()
            .ok_or_else(|| TariffError::Extraction {
                source_label: self.label.clone(),
                page: index + 1,
                message: format!("document has {} pages", self.pages.len()),
            })
    }
}

/// Pick a source for a file by extension.
///
/// `.json` files are glyph dumps; `.pdf` files need the `pdf` feature.
pub fn open(path: &Path) -> Result<Box<dyn GlyphSource>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => Ok(Box::new(JsonSource::new(path))),
        #[cfg(feature = "pdf")]
        Some("pdf") => Ok(Box::new(PdfiumSource::new(path))),
        #[cfg(not(feature = "pdf"))]
        Some("pdf") => Err(TariffError::UnsupportedInput(format!(
            "{}: PDF input requires the `pdf` feature",
            path.display()
        ))),
        _ => Err(TariffError::UnsupportedInput(format!(
            "{}: expected a .json glyph dump or a .pdf file",
            path.display()
        ))),
    }
}
