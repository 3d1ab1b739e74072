//! SMuFL font metadata (`<font>_metadata.json`).
//!
//! Only the two tables the pipeline needs are read: alternates and anchors.
//! Both keep document order so that generated files are stable.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{self, Error, Result};
use crate::model::{is_glyph_code, AnchorPoint, Coordinate};

/// Typed view of a SMuFL font metadata file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontMetadata {
    /// Canonical glyph name → its alternates
    #[serde(default)]
    pub glyphs_with_alternates: IndexMap<String, GlyphAlternates>,
    /// Canonical glyph name → anchor name → [x, y]
    #[serde(default)]
    pub glyphs_with_anchors: IndexMap<String, IndexMap<String, [Coordinate; 2]>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlyphAlternates {
    #[serde(default)]
    pub alternates: Vec<AlternateEntry>,
}

/// One alternate glyph: `{"codepoint": "U+E0A5", "name": "noteheadBlackSmall"}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AlternateEntry {
    pub codepoint: String,
    pub name: String,
}

impl AlternateEntry {
    /// The registry code of this alternate (`U+E0A5` → `E0A5`).
    pub fn code(&self) -> &str {
        self.codepoint.get(2..).unwrap_or("")
    }
}

impl FontMetadata {
    /// Load and validate a metadata file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = error::read_to_string(path)?;
        let metadata: FontMetadata = serde_json::from_str(&json).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        metadata.validate()?;
        Ok(metadata)
    }

    /// Parse metadata from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let metadata: FontMetadata =
            serde_json::from_str(json).map_err(|e| Error::Parse(format!("font metadata: {e}")))?;
        metadata.validate()?;
        Ok(metadata)
    }

    fn validate(&self) -> Result<()> {
        for (canonical, entry) in &self.glyphs_with_alternates {
            for alt in &entry.alternates {
                if !alt.codepoint.starts_with("U+") || !is_glyph_code(alt.code()) {
                    return Err(Error::Parse(format!(
                        "alternate '{}' of '{canonical}' has invalid codepoint '{}'",
                        alt.name, alt.codepoint
                    )));
                }
            }
        }
        Ok(())
    }

    /// Anchors declared for a glyph name, in document order.
    pub fn anchors(&self, glyph_name: &str) -> Vec<AnchorPoint> {
        self.glyphs_with_anchors
            .get(glyph_name)
            .map(|anchors| {
                anchors
                    .iter()
                    .map(|(name, [x, y])| AnchorPoint {
                        name: name.clone(),
                        x: *x,
                        y: *y,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
