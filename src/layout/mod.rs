//! Page layout reconstruction.
//!
//! Turns each page's unordered glyphs into normalized text lines.
//!
//! # Pipeline
//!
//! ```text
//! glyphs → rows (y-clusters) → export filter → column tracking → fee-row normalization → lines
//! ```
//!
//! Column state never crosses a page boundary; each page starts without a
//! column header.

pub mod columns;
pub mod fee_row;
pub mod rows;

use crate::config::LayoutConfig;
use crate::glyph::Glyph;

pub use columns::{ColumnLayout, ColumnLocator, ColumnSet};
pub use fee_row::{normalize_row, Amount, DualStatus, FeeRow, NormalizedRow};
pub use rows::{assemble_rows, Row};

/// Normalized text of one kept page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageText {
    /// Page number (1-based).
    pub number: usize,
    pub lines: Vec<String>,
}

impl PageText {
    /// Marker line opening this page in the document text.
    pub fn marker(&self) -> String {
        page_marker(self.number)
    }

    /// Marker, lines, then a blank separator line.
    pub fn to_text(&self) -> String {
        let mut text = self.marker();
        text.push('\n');
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text.push('\n');
        text
    }
}

/// The line that opens page `number` in the flattened document text.
pub fn page_marker(number: usize) -> String {
    format!("Page {number}:")
}

/// Whether the page title (the second row) marks an export schedule.
///
/// Pages with fewer than two rows have no title and are kept.
pub fn is_export_page(rows: &[Row]) -> bool {
    rows.get(1)
        .is_some_and(|title| title.joined().to_uppercase().contains("EXPORT"))
}

/// Render one page, or `None` if it holds an export schedule.
pub fn render_page(glyphs: &[Glyph], number: usize, layout: &LayoutConfig) -> Option<PageText> {
    let rows = assemble_rows(glyphs, layout.row_tolerance);
    if is_export_page(&rows) {
        return None;
    }

    let mut locator = ColumnLocator::default();
    let lines = rows
        .iter()
        .map(|row| {
            let columns = locator.observe(row);
            normalize_row(row, columns, layout).to_string()
        })
        .collect();

    Some(PageText { number, lines })
}

/// Flatten kept pages into the document text consumed by the segmenter.
pub fn render_document(pages: &[PageText]) -> String {
    pages.iter().map(PageText::to_text).collect()
}
