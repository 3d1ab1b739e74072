//! Per-glyph `<symbol>` files.
//!
//! SVG fonts use a y-up coordinate system, so outlines are flipped with
//! `scale(1,-1)` inside the symbol.

use std::path::Path;

use super::xml_builder::Element;
use crate::error::{self, Result};
use crate::model::{FontGlyph, SvgFont};
use crate::registry::Registry;

pub const SYMBOL_EXTENSION: &str = "xml";

/// Build the `<symbol>` markup of one glyph.
pub fn render_symbol(code: &str, units_per_em: &str, glyph: &FontGlyph) -> String {
    let mut symbol = Element::new("symbol")
        .attr("id", code)
        .attr("viewBox", format!("0 0 {units_per_em} {units_per_em}"))
        .attr("overflow", "inherit");
    if let Some(d) = glyph.outline() {
        symbol.push(
            Element::new("path")
                .attr("transform", "scale(1,-1)")
                .attr("d", d),
        );
    }
    symbol.to_compact_string()
}

/// Write `<dir>/<code>.xml` for every supported glyph of the font.
/// Returns the number of files written.
pub fn write_symbols(font: &SvgFont, registry: &Registry, dir: &Path) -> Result<usize> {
    log::debug!("Writing individual glyph files to {}", dir.display());
    let mut written = 0;
    for glyph in &font.glyphs {
        let Some(code) = glyph.code() else {
            log::debug!("Could not find a glyph name. Skipping");
            continue;
        };
        if !registry.contains(code) {
            log::debug!("Glyph code {code} is not supported. Skipping");
            continue;
        }

        let path = dir.join(format!("{code}.{SYMBOL_EXTENSION}"));
        log::debug!("Writing {}", path.display());
        error::write(&path, render_symbol(code, &font.face.units_per_em, glyph))?;
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn symbol_with_outline_has_flipped_path() {
        let glyph = FontGlyph {
            name: Some("uniE0A4".into()),
            path: Some("M0 0L10 10Z".into()),
            horiz_adv_x: None,
        };
        assert_eq!(
            render_symbol("E0A4", "1000", &glyph),
            r#"<symbol id="E0A4" viewBox="0 0 1000 1000" overflow="inherit"><path transform="scale(1,-1)" d="M0 0L10 10Z" /></symbol>"#
        );
    }

    #[test]
    fn symbol_without_outline_is_empty() {
        let glyph = FontGlyph {
            name: Some("space".into()),
            ..Default::default()
        };
        assert_eq!(
            render_symbol("0020", "2048", &glyph),
            r#"<symbol id="0020" viewBox="0 0 2048 2048" overflow="inherit" />"#
        );
    }
}
