//! Document processing: glyph source → normalized tariff text.
//!
//! Pages are awaited strictly in order. Column state is per page, metadata and
//! group state span the whole document, so no page may be reordered.
//!
//! Extraction failures never escape [`TariffProcessor::process`]: they are
//! logged and the document degrades to an empty output, so one bad file does
//! not abort a batch.

use std::time::Instant;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Result, TariffError};
use crate::format::format_groups;
use crate::glyph::Glyph;
use crate::layout::{render_document, render_page, PageText};
use crate::segment::{segment, TariffGroup};
use crate::source::GlyphSource;

/// Result of processing one document.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedDocument {
    /// The normalized tariff text.
    pub text: String,
    pub groups: Vec<TariffGroup>,
    pub page_count: usize,
    /// Pages dropped because their title marks an export schedule.
    pub export_pages: usize,
    pub elapsed_ms: f64,
}

/// A current/previous pair of the same tariff, e.g. one country's PDF from
/// two consecutive months.
pub struct ComparisonPair {
    pub label: String,
    pub current: Box<dyn GlyphSource>,
    pub previous: Box<dyn GlyphSource>,
}

/// Normalized text of both sides of a pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PairOutput {
    pub current: String,
    pub previous: String,
}

/// Runs the layout, segmentation and formatting stages over a document.
#[derive(Debug, Clone, Default)]
pub struct TariffProcessor {
    config: Config,
}

impl TariffProcessor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Process a document, propagating extraction errors.
    pub async fn try_process(&self, source: &dyn GlyphSource) -> Result<ProcessedDocument> {
        let start = Instant::now();
        let page_count = source.page_count().await?;

        let mut pages = Vec::with_capacity(page_count);
        for index in 0..page_count {
            let glyphs = source.page(index).await?;
            match render_page(&glyphs, index + 1, &self.config.layout) {
                Some(page) => pages.push(page),
                None => debug!("Skipping export page {} of {}", index + 1, source.label()),
            }
        }

        let export_pages = page_count - pages.len();
        let (groups, text) = self.finish(&pages);

        info!(
            "Processed {}: {} pages ({} export), {} groups",
            source.label(),
            page_count,
            export_pages,
            groups.len()
        );

        Ok(ProcessedDocument {
            text,
            groups,
            page_count,
            export_pages,
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }

    /// Process a document; any failure yields an empty string.
    pub async fn process(&self, source: &dyn GlyphSource) -> String {
        match self.try_process(source).await {
            Ok(doc) => doc.text,
            Err(e) => {
                warn!("Error extracting text from {}: {e}", source.label());
                String::new()
            }
        }
    }

    /// Process both sides of a pair concurrently. The two documents share no
    /// state.
    pub async fn process_pair(
        &self,
        current: &dyn GlyphSource,
        previous: &dyn GlyphSource,
    ) -> PairOutput {
        let (current, previous) = tokio::join!(self.process(current), self.process(previous));
        PairOutput { current, previous }
    }

    /// Process every pair concurrently. Outputs keep the input order and
    /// carry the pair's label.
    pub async fn process_batch(&self, pairs: &[ComparisonPair]) -> Vec<(String, PairOutput)> {
        join_all(pairs.iter().map(|pair| async move {
            let output = self
                .process_pair(pair.current.as_ref(), pair.previous.as_ref())
                .await;
            (pair.label.clone(), output)
        }))
        .await
    }

    /// Synchronous variant over in-memory pages.
    pub fn process_pages(&self, pages: &[Vec<Glyph>]) -> String {
        let rendered: Vec<PageText> = pages
            .iter()
            .enumerate()
            .filter_map(|(index, glyphs)| render_page(glyphs, index + 1, &self.config.layout))
            .collect();
        self.finish(&rendered).1
    }

    fn finish(&self, pages: &[PageText]) -> (Vec<TariffGroup>, String) {
        let document = render_document(pages);
        let groups = segment(&document, &self.config.segment);
        let text = format_groups(&groups);
        (groups, text)
    }
}

/// Processing profiles keyed by carrier code.
pub struct ProcessorRegistry {
    processors: Vec<(&'static str, TariffProcessor)>,
}

impl ProcessorRegistry {
    /// Registry with every supported carrier sharing `config`.
    pub fn new(config: Config) -> Self {
        Self {
            processors: vec![("CMA", TariffProcessor::new(config))],
        }
    }

    /// Carrier codes in registration order.
    pub fn carriers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.processors.iter().map(|(code, _)| *code)
    }

    /// Look up a carrier (case-insensitive).
    pub fn get(&self, carrier: &str) -> Result<&TariffProcessor> {
        self.processors
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(carrier))
            .map(|(_, processor)| processor)
            .ok_or_else(|| TariffError::UnknownCarrier(carrier.to_string()))
    }
}

impl Default for ProcessorRegistry {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
