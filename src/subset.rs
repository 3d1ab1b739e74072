//! Font subsetting — strips an SVG font down to the supported glyphs,
//! converts it to WOFF2 and wraps it in a CSS `@font-face` declaration.
//!
//! The SVG font is edited in place by splicing byte ranges reported by the
//! parser, so everything that is not removed keeps its original markup.

use std::fs;
use std::ops::Range;
use std::path::Path;

use crate::converter::{source_date_epoch, FontConverter, FontFormat};
use crate::error::{self, Error, Result};
use crate::model::glyph_code;
use crate::output::{escape_text, render_font_face, subset_license, XML_DECLARATION};
use crate::parser::{find_font_element, parse_document, SVG_NS};
use crate::registry::Registry;

/// Remove kerning and unsupported glyphs from SVG font markup and replace
/// its metadata with the subset license. `path` is used in error messages.
///
/// The `space` glyph and glyphs without a name are always kept.
pub fn subset_svg_font(xml: &str, path: &Path, registry: &Registry, font_name: &str) -> Result<String> {
    let doc = parse_document(xml, path)?;
    let font = find_font_element(&doc).ok_or_else(|| Error::MissingElement {
        path: path.to_path_buf(),
        element: "font".to_string(),
    })?;

    let mut edits: Vec<(Range<usize>, String)> = Vec::new();

    log::debug!("Removing all hkern elements since they are not needed.");
    let mut removed_glyphs = 0;
    for node in font.children().filter(|n| n.is_element()) {
        if node.has_tag_name((SVG_NS, "hkern")) {
            edits.push((whole_line(xml, node.range()), String::new()));
        } else if node.has_tag_name((SVG_NS, "glyph")) {
            let Some(name) = node.attribute("glyph-name").filter(|n| !n.is_empty()) else {
                continue;
            };
            if name != "space" && !registry.contains(glyph_code(name)) {
                edits.push((whole_line(xml, node.range()), String::new()));
                removed_glyphs += 1;
            }
        }
    }
    log::debug!("Removing {removed_glyphs} unsupported glyphs");

    if let Some(metadata) = doc.descendants().find(|n| n.has_tag_name((SVG_NS, "metadata"))) {
        log::debug!("Shortening metadata entry to the essentials.");
        edits.push((
            metadata.range(),
            format!("<metadata>{}</metadata>", escape_text(&subset_license(font_name))),
        ));
    }

    Ok(apply_edits(xml, edits))
}

/// Subset the SVG font at `font_path`, convert it with `converter` and
/// return the CSS declaration embedding the WOFF2 result.
///
/// The subset SVG and WOFF2 are written to a temporary directory that is
/// removed on return. When `keep_dir` is given they are copied there as
/// `<font>_subset.svg` and `<font>_subset.woff2` first.
pub fn subset_to_css(
    font_path: &Path,
    font_name: &str,
    registry: &Registry,
    converter: &dyn FontConverter,
    keep_dir: Option<&Path>,
) -> Result<String> {
    log::debug!("Creating a subset SVG file from {}", font_path.display());
    log::debug!("The resulting subset font will have {} glyphs", registry.len());

    let epoch = source_date_epoch(font_path)?;
    let xml = error::read_to_string(font_path)?;
    let subset = subset_svg_font(&xml, font_path, registry, font_name)?;

    let tmp = tempfile::Builder::new()
        .prefix("smufl-fonts")
        .tempdir()
        .map_err(|e| Error::io(&std::env::temp_dir(), e))?;
    log::debug!("Created temporary directory {}", tmp.path().display());

    let svg_path = tmp.path().join(format!("{font_name}.{}", FontFormat::Svg.extension()));
    let woff2_path = tmp.path().join(format!("{font_name}.{}", FontFormat::Woff2.extension()));

    log::debug!("Writing SVG font {}", svg_path.display());
    error::write(&svg_path, &subset)?;

    converter.convert(&svg_path, &woff2_path, Some(epoch))?;
    log::debug!("WOFF2 file generated at {}", woff2_path.display());

    let woff2 = fs::read(&woff2_path).map_err(|e| Error::read(&woff2_path, e))?;
    let css = render_font_face(font_name, &woff2);

    if let Some(dir) = keep_dir {
        log::debug!("Keeping intermediate files in {}", dir.display());
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        copy(&svg_path, &dir.join(format!("{font_name}_subset.svg")))?;
        copy(&woff2_path, &dir.join(format!("{font_name}_subset.woff2")))?;
    }

    log::debug!("Removing temporary directory {}", tmp.path().display());
    Ok(css)
}

fn copy(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to).map(|_| ()).map_err(|e| Error::io(to, e))
}

// ─── Splicing ────────────────────────────────────────────────────────

fn apply_edits(xml: &str, mut edits: Vec<(Range<usize>, String)>) -> String {
    edits.sort_by_key(|(range, _)| range.start);

    let mut out = String::with_capacity(xml.len());
    if !xml.trim_start().starts_with("<?xml") {
        out.push_str(XML_DECLARATION);
        out.push('\n');
    }

    let mut pos = 0;
    for (range, replacement) in edits {
        // Nested edits are covered by the enclosing one.
        if range.start < pos {
            continue;
        }
        out.push_str(&xml[pos..range.start]);
        out.push_str(&replacement);
        pos = range.end;
    }
    out.push_str(&xml[pos..]);
    out
}

/// Widen `range` to its whole line when nothing else shares that line.
fn whole_line(xml: &str, range: Range<usize>) -> Range<usize> {
    let bytes = xml.as_bytes();
    let mut start = range.start;
    while start > 0 && matches!(bytes[start - 1], b' ' | b'\t') {
        start -= 1;
    }
    let mut end = range.end;
    while end < bytes.len() && matches!(bytes[end], b' ' | b'\t' | b'\r') {
        end += 1;
    }

    let at_line_start = start == 0 || bytes[start - 1] == b'\n';
    if at_line_start && end < bytes.len() && bytes[end] == b'\n' {
        start..end + 1
    } else {
        range
    }
}
