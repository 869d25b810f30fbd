//! `TariffScan` - Demurrage & detention tariff normalizer
//!
//! Reconstructs the fee schedules of carrier tariff PDFs from positioned text
//! glyphs and renders them as flat, comparison-ready text.
//!
//! # Features
//!
//! - **Layout reconstruction**: rows from y-clusters, column tracking from `SLAB` headers
//! - **Fee-row normalization**: single and side-by-side demurrage/detention schedules
//! - **Segmentation**: metadata-keyed tariff groups with merged or splitted containers
//! - **Sources**: in-memory pages, JSON glyph dumps, PDF via pdfium (`pdf` feature)
//!
//! # Example
//!
//! ```rust,no_run
//! use tariffscan::{JsonSource, TariffProcessor};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let processor = TariffProcessor::default();
//!     let source = JsonSource::new("tariffs/FR/current.json");
//!     let doc = processor.try_process(&source).await?;
//!     println!("{}", doc.text);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod glyph;
pub mod layout;
pub mod pipeline;
pub mod segment;
pub mod source;

pub use config::{Config, LayoutConfig, SegmentConfig};
pub use error::{Result, TariffError};
pub use format::{format_groups, GROUP_HEADER};
pub use glyph::{Glyph, GlyphDocument};
pub use layout::{render_document, render_page, PageText};
pub use pipeline::{
    ComparisonPair, PairOutput, ProcessedDocument, ProcessorRegistry, TariffProcessor,
};
pub use segment::{segment, Container, LineStream, TariffGroup, TariffMetadata};
pub use source::{GlyphSource, JsonSource, MemorySource};
#[cfg(feature = "pdf")]
pub use source::PdfiumSource;

/// Version of tariffscan
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
