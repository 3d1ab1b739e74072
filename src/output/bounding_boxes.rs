//! Bounding-box index — one `<g>` per supported glyph with its bounds,
//! advance, SMuFL name and anchors.

use std::path::Path;

use super::xml_builder::{format_number, Element};
use crate::error::{self, Result};
use crate::geometry::glyph_bounds;
use crate::metadata::FontMetadata;
use crate::model::{round2, Coordinate, SvgFont};
use crate::registry::Registry;

/// Build the bounding-box document for a font.
pub fn render_bounding_boxes(
    font: &SvgFont,
    registry: &Registry,
    metadata: &FontMetadata,
) -> Result<String> {
    log::debug!("Writing bounding-boxes file for {}", font.face.family);
    let mut root = Element::new("bounding-boxes")
        .attr("font-family", font.face.family.as_str())
        .attr("units-per-em", font.face.units_per_em.as_str());

    for glyph in &font.glyphs {
        let Some(code) = glyph.code() else {
            log::debug!("Could not find a glyph name. Skipping");
            continue;
        };
        let Some(name) = registry.name(code) else {
            continue;
        };

        let bounds = glyph_bounds(code, glyph.outline())?;
        let advance = glyph.advance(&font.face);

        // A width that is not a number falls back to the advance.
        let width = if bounds.width.is_finite() {
            format_number(bounds.width)
        } else {
            advance.to_string()
        };

        let mut g = Element::new("g")
            .attr("c", code)
            .attr("x", format_number(bounds.x))
            .attr("y", format_number(bounds.y))
            .attr("w", width)
            .attr("h", format_number(bounds.height))
            .attr("h-a-x", advance)
            .attr("n", name);

        for anchor in metadata.anchors(name) {
            g.push(
                Element::new("a")
                    .attr("n", anchor.name)
                    .attr("x", format_coordinate(anchor.x))
                    .attr("y", format_coordinate(anchor.y)),
            );
        }
        root.push(g);
    }

    Ok(root.to_document_string())
}

/// Anchor coordinates keep their JSON type: integers print bare, floats
/// are rounded to two decimals.
fn format_coordinate(value: Coordinate) -> String {
    match value {
        Coordinate::Int(i) => i.to_string(),
        Coordinate::Float(f) => format_number(round2(f)),
    }
}

/// Render and write the bounding-box document to `path`.
pub fn write_bounding_boxes(
    font: &SvgFont,
    registry: &Registry,
    metadata: &FontMetadata,
    path: &Path,
) -> Result<()> {
    let document = render_bounding_boxes(font, registry, metadata)?;
    log::debug!("Writing {}", path.display());
    error::write(path, document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{FontFace, FontGlyph};
    use pretty_assertions::assert_eq;

    fn font(glyphs: Vec<FontGlyph>) -> SvgFont {
        SvgFont {
            face: FontFace {
                family: "Leipzig".into(),
                units_per_em: "1000".into(),
                default_horiz_adv_x: "250".into(),
            },
            glyphs,
        }
    }

    fn glyph(name: &str, d: Option<&str>) -> FontGlyph {
        FontGlyph {
            name: Some(name.into()),
            path: d.map(String::from),
            horiz_adv_x: None,
        }
    }

    fn registry() -> Registry {
        [
            ("0041".to_string(), "noteheadBlack".to_string()),
            ("0020".to_string(), "space".to_string()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn writes_bounds_names_and_anchors() {
        let metadata = FontMetadata::from_json(
            r#"{"glyphsWithAnchors": {"noteheadBlack": {"stemUpSE": [1.184, 0.168]}}}"#,
        )
        .unwrap();
        let font = font(vec![
            glyph("uni0041", Some("M0 -135L295 -135L295 135L0 135Z")),
            glyph("space", None),
            glyph("uniE999", Some("M0 0L1 1Z")),
            FontGlyph::default(),
        ]);

        let doc = render_bounding_boxes(&font, &registry(), &metadata).unwrap();
        assert_eq!(
            doc,
            "<?xml version='1.0' encoding='UTF-8'?>\n\
             <bounding-boxes font-family=\"Leipzig\" units-per-em=\"1000\">\n  \
             <g c=\"0041\" x=\"0.0\" y=\"-135.0\" w=\"295.0\" h=\"270.0\" h-a-x=\"250\" n=\"noteheadBlack\">\n    \
             <a n=\"stemUpSE\" x=\"1.18\" y=\"0.17\" />\n  \
             </g>\n  \
             <g c=\"0020\" x=\"0.0\" y=\"0.0\" w=\"0.0\" h=\"0.0\" h-a-x=\"250\" n=\"space\" />\n\
             </bounding-boxes>"
        );
    }

    #[test]
    fn anchors_round_ties_to_even_and_keep_integers() {
        let metadata = FontMetadata::from_json(
            r#"{"glyphsWithAnchors": {"noteheadBlack": {"cutOutNE": [0.125, 0.625], "cutOutSW": [0, 1]}}}"#,
        )
        .unwrap();
        let font = font(vec![glyph("uni0041", Some("M0 0L10 10Z"))]);
        let doc = render_bounding_boxes(&font, &registry(), &metadata).unwrap();
        assert!(doc.contains(r#"<a n="cutOutNE" x="0.12" y="0.62" />"#));
        assert!(doc.contains(r#"<a n="cutOutSW" x="0" y="1" />"#));
    }

    #[test]
    fn glyph_advance_overrides_font_default() {
        let mut space = glyph("space", None);
        space.horiz_adv_x = Some("333".into());
        let doc = render_bounding_boxes(&font(vec![space]), &registry(), &FontMetadata::default())
            .unwrap();
        assert!(doc.contains(r#"h-a-x="333""#));
    }

    #[test]
    fn empty_font_yields_empty_root() {
        let doc = render_bounding_boxes(&font(vec![]), &registry(), &FontMetadata::default())
            .unwrap();
        assert!(doc.ends_with(r#"<bounding-boxes font-family="Leipzig" units-per-em="1000" />"#));
    }

    #[test]
    fn malformed_outline_propagates() {
        let font = font(vec![glyph("uni0041", Some("M0 0 Q"))]);
        let err = render_bounding_boxes(&font, &registry(), &FontMetadata::default()).unwrap_err();
        assert!(matches!(err, Error::Geometry { .. }));
    }
}
