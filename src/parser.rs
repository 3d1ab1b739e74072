//! SVG font parser — reads the font-face attributes and glyph list of an
//! SVG font file into the [`SvgFont`] data model.

use std::path::Path;

use roxmltree::{Document, Node};

use crate::error::{self, Error, Result};
use crate::model::*;

/// SVG namespace all font elements live in.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Parse an SVG font file.
pub fn read_svg_font(path: &Path) -> Result<SvgFont> {
    let xml = error::read_to_string(path)?;
    let doc = parse_document(&xml, path)?;
    parse_svg_font(&doc, path)
}

/// Parse SVG font markup. `path` is only used in error messages.
pub fn parse_svg_font(doc: &Document, path: &Path) -> Result<SvgFont> {
    let font = find_font_element(doc)
        .ok_or_else(|| Error::malformed(path, "could not find a font definition"))?;

    let faces: Vec<Node> = doc
        .descendants()
        .filter(|n| n.has_tag_name((SVG_NS, "font-face")))
        .collect();
    if faces.len() != 1 {
        return Err(Error::malformed(
            path,
            format!(
                "expected a unique font-face element, found {}; check that the svg has the {SVG_NS} namespace",
                faces.len()
            ),
        ));
    }

    let family = non_empty_attr(&faces[0], "font-family");
    let units_per_em = non_empty_attr(&faces[0], "units-per-em");
    let (Some(family), Some(units_per_em)) = (family, units_per_em) else {
        return Err(Error::malformed(
            path,
            "could not find a font family or units-per-em definition",
        ));
    };

    let face = FontFace {
        family: family.to_string(),
        units_per_em: units_per_em.to_string(),
        default_horiz_adv_x: font.attribute("horiz-adv-x").unwrap_or("0").to_string(),
    };

    let glyphs = doc
        .descendants()
        .filter(|n| n.has_tag_name((SVG_NS, "glyph")))
        .map(|n| parse_glyph(&n))
        .collect();

    Ok(SvgFont { face, glyphs })
}

/// Parse markup that may carry a DOCTYPE, as SVG fonts exported by
/// FontForge do.
pub(crate) fn parse_document<'a>(xml: &'a str, path: &Path) -> Result<Document<'a>> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    Document::parse_with_options(xml, options).map_err(|source| Error::Xml {
        path: path.to_path_buf(),
        source,
    })
}

/// The `<font>` element directly under the root's `<defs>`.
pub(crate) fn find_font_element<'a, 'input>(doc: &'a Document<'input>) -> Option<Node<'a, 'input>> {
    doc.root_element()
        .children()
        .filter(|n| n.has_tag_name((SVG_NS, "defs")))
        .flat_map(|defs| defs.children())
        .find(|n| n.has_tag_name((SVG_NS, "font")))
}

// ─── Glyphs ──────────────────────────────────────────────────────────

fn parse_glyph(node: &Node) -> FontGlyph {
    FontGlyph {
        name: non_empty_attr(node, "glyph-name").map(String::from),
        path: node.attribute("d").map(String::from),
        horiz_adv_x: node.attribute("horiz-adv-x").map(String::from),
    }
}

fn non_empty_attr<'a>(node: &Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name).filter(|v| !v.is_empty())
}
