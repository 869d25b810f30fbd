//! JSON glyph dumps.
//!
//! Format: `{"pages": [[{"text": "SLAB", "x": 40.0, "y": 700.0}, ...], ...]}`.
//! The file is read once, on first use.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::OnceCell;

use super::GlyphSource;
use crate::error::{Result, TariffError};
use crate::glyph::{Glyph, GlyphDocument};

/// Reads glyph pages from a JSON dump on disk.
pub struct JsonSource {
    path: PathBuf,
    label: String,
    document: OnceCell<GlyphDocument>,
}

impl JsonSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            label: path.display().to_string(),
            path,
            document: OnceCell::new(),
        }
    }

    async fn document(&self) -> Result<&GlyphDocument> {
        self.document
            .get_or_try_init(|| async {
                let bytes = tokio::fs::read(&self.path).await?;
                let doc: GlyphDocument = serde_json::from_slice(&bytes)?;
                tracing::debug!("Loaded {} glyph pages from {}", doc.pages.len(), self.label);
                Ok::<_, TariffError>(doc)
            })
            .await
    }
}

#[async_trait]
impl GlyphSource for JsonSource {
    fn label(&self) -> &str {
        &self.label
    }

    async fn page_count(&self) -> Result<usize> {
        Ok(self.document().await?.pages.len())
    }

    async fn page(&self, index: usize) -> Result<Vec<Glyph>> {
        let doc = self.document().await?;
        doc.pages
            .get(index)
            .cloned()
            .ok_or_else(|| TariffError::Extraction {
                source_label: self.label.clone(),
                page: index + 1,
                message: format!("dump has {} pages", doc.pages.len()),
            })
    }
}
