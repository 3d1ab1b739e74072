//! Data model for SVG fonts and the glyph data extracted from them.
//!
//! Values that are copied verbatim into generated files (units-per-em,
//! horizontal advances, outline data) are kept as the strings found in the
//! source font so that the output reproduces them exactly.

use serde::{Deserialize, Serialize};

/// Code of the space glyph, which SVG fonts name `space` instead of
/// encoding its codepoint in the glyph name.
pub const SPACE_CODE: &str = "0020";

/// Derive the 4-character glyph code from an SVG font glyph name.
///
/// `space` maps to [`SPACE_CODE`]; any other name yields its last four
/// characters (`uniE0A4` → `E0A4`). Names shorter than four characters are
/// returned unchanged.
pub fn glyph_code(name: &str) -> &str {
    if name == "space" {
        return SPACE_CODE;
    }
    match name.char_indices().rev().nth(3) {
        Some((idx, _)) => &name[idx..],
        None => name,
    }
}

/// True if `code` is exactly four ASCII hex digits.
pub fn is_glyph_code(code: &str) -> bool {
    code.len() == 4 && code.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Font-level attributes from the `<font>` and `<font-face>` elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontFace {
    /// `font-family` of the font-face
    pub family: String,
    /// Size of the em square in font units
    pub units_per_em: String,
    /// `horiz-adv-x` of the font element, "0" when absent
    pub default_horiz_adv_x: String,
}

/// One `<glyph>` element of an SVG font.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FontGlyph {
    /// `glyph-name` (e.g. "uniE0A4" or "space")
    pub name: Option<String>,
    /// Outline in SVG path syntax (`d` attribute)
    pub path: Option<String>,
    /// Glyph-specific advance overriding the font default
    pub horiz_adv_x: Option<String>,
}

impl FontGlyph {
    /// The registry code this glyph maps to, if it has a name.
    pub fn code(&self) -> Option<&str> {
        self.name.as_deref().map(glyph_code)
    }

    /// Outline data, ignoring an empty `d` attribute.
    pub fn outline(&self) -> Option<&str> {
        self.path.as_deref().filter(|d| !d.trim().is_empty())
    }

    /// The glyph advance, falling back to the font default.
    pub fn advance<'a>(&'a self, face: &'a FontFace) -> &'a str {
        self.horiz_adv_x
            .as_deref()
            .unwrap_or(&face.default_horiz_adv_x)
    }
}

/// A parsed SVG font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvgFont {
    pub face: FontFace,
    pub glyphs: Vec<FontGlyph>,
}

/// Glyph bounds in font units, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Bounds of a glyph without outline.
    pub const EMPTY: BoundingBox = BoundingBox {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Build from extrema, rounding every component to two decimals.
    pub fn from_extrema(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        BoundingBox {
            x: round2(xmin),
            y: round2(ymin),
            width: round2(xmax - xmin),
            height: round2(ymax - ymin),
        }
    }
}

/// A named attachment point of a glyph (e.g. `stemUpSE`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub name: String,
    pub x: Coordinate,
    pub y: Coordinate,
}

/// An anchor coordinate as written in the metadata. Integers stay integers
/// in generated files (`0`, not `0.0`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Int(i64),
    Float(f64),
}

/// Round to two decimal places, half to even on the exact binary value.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
