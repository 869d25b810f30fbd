//! Row assembly: clusters a page's glyphs into visual text lines.

use std::cmp::Ordering;

use crate::glyph::Glyph;

/// Glyphs sharing one y-cluster, ordered left to right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub glyphs: Vec<Glyph>,
}

impl Row {
    /// Glyph texts joined by a single space.
    pub fn joined(&self) -> String {
        self.glyphs
            .iter()
            .map(|g| g.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.glyphs.iter().any(|g| g.text.contains(needle))
    }

    pub fn has_period_marker(&self) -> bool {
        self.glyphs.iter().any(Glyph::is_period_marker)
    }
}

/// Cluster glyphs into rows in reading order.
///
/// 1. Sort by Y descending (top-to-bottom), then X ascending.
/// 2. Start a new row whenever a glyph is more than `tolerance` away from the
///    *first* glyph of the current row.
/// 3. Order each row by X.
///
/// Glyph text is trimmed on the way in.
pub fn assemble_rows(glyphs: &[Glyph], tolerance: f32) -> Vec<Row> {
    let mut sorted: Vec<Glyph> = glyphs
        .iter()
        .map(|g| Glyph::new(g.text.trim(), g.x, g.y))
        .collect();
    sorted.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
    });

    let mut rows = Vec::new();
    let mut current: Vec<Glyph> = Vec::new();
    let mut anchor_y = 0.0_f32;

    for glyph in sorted {
        if current.is_empty() {
            anchor_y = glyph.y;
        } else if (glyph.y - anchor_y).abs() > tolerance {
            rows.push(finish_row(std::mem::take(&mut current)));
            anchor_y = glyph.y;
        }
        current.push(glyph);
    }

    if !current.is_empty() {
        rows.push(finish_row(current));
    }

    rows
}

fn finish_row(mut glyphs: Vec<Glyph>) -> Row {
    glyphs.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
    Row { glyphs }
}
