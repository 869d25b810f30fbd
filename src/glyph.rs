//! Positioned text runs supplied by a glyph-extraction collaborator.
//!
//! Shared by the layout stage and the glyph sources. Kept separate so that
//! sources do not depend on layout internals.

use serde::{Deserialize, Serialize};

/// One visible text run on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    pub text: String,
    /// Left edge in PDF points.
    pub x: f32,
    /// Baseline Y position (bottom-up coordinate system).
    pub y: f32,
}

impl Glyph {
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
        }
    }

    /// Period markers open a fee-data row ("From 1st to 5th").
    pub fn is_period_marker(&self) -> bool {
        self.text.starts_with("From")
    }

    /// Whether the text reads as a number, the way fee amounts are printed.
    ///
    /// Decimal and exponent forms, signed `Infinity`, and unsigned `0x`/`0o`/`0b`
    /// literals count. Other spellings of infinity or NaN (`inf`, `nan`) do not.
    pub fn is_numeric(&self) -> bool {
        let text = self.text.trim();
        if let Some((radix, digits)) = radix_literal(text) {
            return !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix));
        }

        let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
        if unsigned == "Infinity" {
            return true;
        }
        !unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) && text.parse::<f64>().is_ok()
    }
}

/// Split `0x1F`-style literals into radix and digits.
fn radix_literal(text: &str) -> Option<(u32, &str)> {
    let (prefix, digits) = text.split_at_checked(2)?;
    let radix = match prefix {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    Some((radix, digits))
}

/// Serialized glyph dump: one unordered glyph bag per page, in page order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlyphDocument {
    #[serde(default)]
    pub pages: Vec<Vec<Glyph>>,
}
