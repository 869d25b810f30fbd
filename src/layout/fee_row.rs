//! Fee-row normalization.
//!
//! A fee-data row starts with a period marker ("From 1st to 5th") followed by
//! one amount per container size. Amounts are assigned to columns by nearest
//! header position. When demurrage and detention tables are printed side by
//! side the row holds two schedules, possibly with one of them missing; the
//! row is split at the second period marker and each half is matched against
//! its own three columns.

use std::fmt;

use crate::config::LayoutConfig;
use crate::glyph::Glyph;

use super::columns::{ColumnLayout, ColumnSet};
use super::rows::Row;

/// One fee cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Amount {
    /// No amount within tolerance of the column. Rendered as `0`.
    Unset,
    /// Amount text as printed; passes [`Glyph::is_numeric`].
    Value(String),
}

impl Amount {
    /// Decimal value; `None` when unset or printed as a radix literal.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Unset => None,
            Self::Value(text) => text.trim().parse().ok(),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("0"),
            Self::Value(text) => f.write_str(text),
        }
    }
}

/// A period label with the amounts for the 20', 40' and 45' columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeRow {
    /// Rendered as `0` when absent.
    pub period: Option<String>,
    pub values: [Amount; 3],
}

/// Period label of the synthetic row standing in for a missing schedule.
const PLACEHOLDER_PERIOD: &str = "From 0th to 0th";

impl FeeRow {
    /// Stand-in for the schedule absent from a side-by-side row.
    ///
    /// Renders as `From 0th to 0th 0 0 0`.
    pub fn placeholder() -> Self {
        Self {
            period: Some(PLACEHOLDER_PERIOD.to_string()),
            values: [Amount::Unset, Amount::Unset, Amount::Unset],
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.period.as_deref() == Some(PLACEHOLDER_PERIOD)
            && self.values.iter().all(|v| *v == Amount::Unset)
    }

    /// The four rendered fields: period then the three amounts.
    pub fn fields(&self) -> [String; 4] {
        [
            self.period.clone().unwrap_or_else(|| "0".to_string()),
            self.values[0].to_string(),
            self.values[1].to_string(),
            self.values[2].to_string(),
        ]
    }
}

impl fmt::Display for FeeRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fields().join(" "))
    }
}

/// Which halves of a side-by-side row were actually printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DualStatus {
    Full,
    MissingDemurrage,
    MissingDetention,
}

/// A page row after normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedRow {
    /// Not a fee row, or no usable column header: glyph texts joined.
    Raw(String),
    Single(FeeRow),
    Dual {
        demurrage: FeeRow,
        detention: FeeRow,
        status: DualStatus,
    },
}

impl fmt::Display for NormalizedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(text) => f.write_str(text),
            Self::Single(row) => write!(f, "{row}"),
            Self::Dual {
                demurrage,
                detention,
                ..
            } => write!(f, "{demurrage} {detention}"),
        }
    }
}

/// Normalize one row against the column set in effect for it.
pub fn normalize_row(row: &Row, columns: &ColumnSet, layout: &LayoutConfig) -> NormalizedRow {
    if !row.has_period_marker() {
        return NormalizedRow::Raw(row.joined());
    }

    match columns.layout() {
        ColumnLayout::Single(cols) => NormalizedRow::Single(single_schedule(row, cols, layout)),
        ColumnLayout::Dual(left, right) => dual_schedule(row, left, right, layout),
        ColumnLayout::Unknown => NormalizedRow::Raw(row.joined()),
    }
}

fn single_schedule(row: &Row, cols: &[f32; 3], layout: &LayoutConfig) -> FeeRow {
    let limit = cols[0] - layout.period_margin;
    FeeRow {
        period: period_text(row.glyphs.iter().filter(|g| g.x < limit), ""),
        values: match_amounts(&row.glyphs, cols, layout.column_tolerance),
    }
}

fn dual_schedule(
    row: &Row,
    left: &[f32; 3],
    right: &[f32; 3],
    layout: &LayoutConfig,
) -> NormalizedRow {
    let markers: Vec<&Glyph> = row.glyphs.iter().filter(|g| g.is_period_marker()).collect();

    match markers.as_slice() {
        [first, second] => {
            let split = first.x.max(second.x);
            let (dem_glyphs, det_glyphs): (Vec<Glyph>, Vec<Glyph>) =
                row.glyphs.iter().cloned().partition(|g| g.x < split);

            let dem_limit = left[0] - layout.period_margin;
            let det_limit = right[0] - layout.period_margin;

            NormalizedRow::Dual {
                demurrage: FeeRow {
                    period: period_text(dem_glyphs.iter().filter(|g| g.x < dem_limit), " "),
                    values: match_amounts(&dem_glyphs, left, layout.column_tolerance),
                },
                detention: FeeRow {
                    period: period_text(det_glyphs.iter().filter(|g| g.x < det_limit), " "),
                    values: match_amounts(&det_glyphs, right, layout.column_tolerance),
                },
                status: DualStatus::Full,
            }
        }
        [only] if only.x > layout.detention_only_min_x => NormalizedRow::Dual {
            demurrage: FeeRow::placeholder(),
            detention: FeeRow {
                period: period_text(markers.iter().copied(), " "),
                values: match_amounts(&row.glyphs, right, layout.column_tolerance),
            },
            status: DualStatus::MissingDemurrage,
        },
        _ => NormalizedRow::Dual {
            demurrage: FeeRow {
                period: period_text(markers.iter().copied(), " "),
                values: match_amounts(&row.glyphs, left, layout.column_tolerance),
            },
            detention: FeeRow::placeholder(),
            status: DualStatus::MissingDetention,
        },
    }
}

/// Join glyph texts into a period label; `None` if nothing remains.
fn period_text<'g>(glyphs: impl Iterator<Item = &'g Glyph>, separator: &str) -> Option<String> {
    let text = glyphs
        .map(|g| g.text.as_str())
        .collect::<Vec<_>>()
        .join(separator);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Assign the nearest numeric glyph to each column.
///
/// Period markers are never amounts. Ties keep the leftmost glyph; matches
/// further than `tolerance` leave the amount unset.
fn match_amounts(glyphs: &[Glyph], cols: &[f32; 3], tolerance: f32) -> [Amount; 3] {
    let candidates: Vec<&Glyph> = glyphs
        .iter()
        .filter(|g| !g.is_period_marker() && g.is_numeric())
        .collect();

    cols.map(|col| {
        let mut best: Option<(&Glyph, f32)> = None;
        for &glyph in &candidates {
            let distance = (glyph.x - col).abs();
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((glyph, distance));
            }
        }
        match best {
            Some((glyph, distance)) if distance <= tolerance => Amount::Value(glyph.text.clone()),
            _ => Amount::Unset,
        }
    })
}
