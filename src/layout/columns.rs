//! Column location from the SLAB header row.

use super::rows::Row;

/// Container size-class tokens as printed in the SLAB header.
///
/// Both the ASCII apostrophe and the typographic one occur in the wild.
pub const SIZE_TOKENS: [&str; 6] = ["20'", "40'", "45'", "20’", "40’", "45’"];

/// Marker identifying a column header row.
pub const HEADER_MARKER: &str = "SLAB";

/// X positions of the size-class columns, left to right.
///
/// Three entries describe a single schedule; six describe demurrage and
/// detention tables printed side by side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSet {
    positions: Vec<f32>,
}

/// The shape a [`ColumnSet`] describes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnLayout<'a> {
    Single(&'a [f32; 3]),
    Dual(&'a [f32; 3], &'a [f32; 3]),
    /// No header seen yet, or an unexpected number of size tokens.
    Unknown,
}

impl ColumnSet {
    pub fn new(positions: Vec<f32>) -> Self {
        Self { positions }
    }

    /// Columns from a header row, or `None` if the row is not a header.
    pub fn from_header(row: &Row) -> Option<Self> {
        if !row.contains_text(HEADER_MARKER) {
            return None;
        }
        let positions = row
            .glyphs
            .iter()
            .filter(|g| SIZE_TOKENS.contains(&g.text.as_str()))
            .map(|g| g.x)
            .collect();
        Some(Self { positions })
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn layout(&self) -> ColumnLayout<'_> {
        if let Ok(single) = <&[f32; 3]>::try_from(self.positions.as_slice()) {
            return ColumnLayout::Single(single);
        }
        if self.positions.len() == 6 {
            let (left, right) = self.positions.split_at(3);
            if let (Ok(l), Ok(r)) = (<&[f32; 3]>::try_from(left), <&[f32; 3]>::try_from(right)) {
                return ColumnLayout::Dual(l, r);
            }
        }
        ColumnLayout::Unknown
    }
}

/// Tracks the active column set while scanning one page.
///
/// Starts empty on every page; a header row replaces the active set for all
/// rows below it.
#[derive(Debug, Default)]
pub struct ColumnLocator {
    active: ColumnSet,
}

impl ColumnLocator {
    /// Feed the next row and return the column set in effect for it.
    pub fn observe(&mut self, row: &Row) -> &ColumnSet {
        if let Some(columns) = ColumnSet::from_header(row) {
            self.active = columns;
        }
        &self.active
    }
}
