//! Glyph extraction from PDF files via `pdfium-render`.
//!
//! One glyph per pdfium text segment, positioned at the segment's bottom-left
//! corner. pdfium is not `Send`, so the whole document is decoded once on a
//! blocking thread and cached.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pdfium_render::prelude::*;
use tokio::sync::OnceCell;

use super::GlyphSource;
use crate::error::{Result, TariffError};
use crate::glyph::Glyph;

/// Reads glyphs from a PDF using the system pdfium library.
pub struct PdfiumSource {
    path: PathBuf,
    label: String,
    pages: OnceCell<Vec<Vec<Glyph>>>,
}

impl PdfiumSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            label: path.display().to_string(),
            path,
            pages: OnceCell::new(),
        }
    }

    async fn pages(&self) -> Result<&Vec<Vec<Glyph>>> {
        self.pages
            .get_or_try_init(|| async {
                let path = self.path.clone();
                let pages = tokio::task::spawn_blocking(move || extract_glyphs(&path))
                    .await
                    .map_err(|e| TariffError::Pdf(format!("extraction task failed: {e}")))??;
                tracing::debug!("Extracted {} PDF pages from {}", pages.len(), self.label);
                Ok::<_, TariffError>(pages)
            })
            .await
    }
}

/// Extract every page's text segments.
#[allow(deprecated)] // PdfRect field access deprecated in 0.8.28, removed in 0.9.0
fn extract_glyphs(path: &Path) -> Result<Vec<Vec<Glyph>>> {
    let pdfium = Pdfium::default();
    let doc = pdfium
        .load_pdf_from_file(path, None)
        .map_err(|e| TariffError::Pdf(format!("failed to parse {}: {e}", path.display())))?;

    let mut pages = Vec::new();
    for (page_idx, page) in doc.pages().iter().enumerate() {
        let text = page.text().map_err(|e| TariffError::Extraction {
            source_label: path.display().to_string(),
            page: page_idx + 1,
            message: e.to_string(),
        })?;

        let glyphs = text
            .segments()
            .iter()
            .filter_map(|segment| {
                let content = segment.text();
                if content.trim().is_empty() {
                    return None;
                }
                let bounds = segment.bounds();
                Some(Glyph::new(content, bounds.left.value, bounds.bottom.value))
            })
            .collect();
        pages.push(glyphs);
    }

    Ok(pages)
}

#[async_trait]
impl GlyphSource for PdfiumSource {
    fn label(&self) -> &str {
        &self.label
    }

    async fn page_count(&self) -> Result<usize> {
        Ok(self.pages().await?.len())
    }

    async fn page(&self, index: usize) -> Result<Vec<Glyph>> {
        let pages = self.pages().await?;
        pages
            .get(index)
            .cloned()
            .ok_or_else(|| TariffError::Extraction {
                source_label: self.label.clone(),
                page: index + 1,
                message: format!("document has {} pages", pages.len()),
            })
    }
}
