//! Pipeline entry points, one per command.
//!
//! Every command checks that its inputs are readable and its destinations
//! writable before doing any work, so failures name the missing
//! precondition instead of surfacing halfway through a run.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::converter::{source_date_epoch, FontConverter, FontFormat};
use crate::coverage::{self, CoverageReport};
use crate::error::{self, Error, Result};
use crate::metadata::FontMetadata;
use crate::output;
use crate::parser::read_svg_font;
use crate::registry::Registry;
use crate::subset::subset_to_css;

/// Locations of a font's source files: `<source>/<Font>/<Font>.svg` and
/// `<source>/<Font>/<font>_metadata.json`.
#[derive(Debug, Clone)]
pub struct FontSource {
    pub name: String,
    pub dir: PathBuf,
}

impl FontSource {
    pub fn new(source_dir: &Path, name: &str) -> Self {
        FontSource {
            name: name.to_string(),
            dir: source_dir.join(name),
        }
    }

    pub fn svg(&self) -> PathBuf {
        self.dir.join(format!("{}.svg", self.name))
    }

    pub fn metadata(&self) -> PathBuf {
        self.dir
            .join(format!("{}_metadata.json", self.name.to_lowercase()))
    }

    /// Where `--keep-intermediates` leaves the subset fonts.
    pub fn intermediates(&self) -> PathBuf {
        self.dir.join("tmp")
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════

/// Write `smufl.h` for the glyphs listed in `supported` into `header_dir`.
pub fn generate_header(supported: &Path, header_dir: &Path) -> Result<PathBuf> {
    require_file(supported)?;
    require_writable_dir(header_dir)?;

    log::debug!("SMuFL header will be stored in {}", header_dir.display());
    let registry = Registry::load(supported)?;
    let path = output::write_header(&registry, header_dir)?;
    log::debug!("Finished writing SMuFL header");
    Ok(path)
}

/// Write one symbol file per supported glyph into `<data>/<Font>/` and the
/// bounding-box index `<data>/<Font>.xml`.
pub fn extract_glyphs(font: &FontSource, supported: &Path, data_dir: &Path) -> Result<()> {
    log::debug!("Extracting fonts for {} from {}", font.name, font.dir.display());
    require_dir(&font.dir)?;
    require_file(&font.metadata())?;
    require_file(&font.svg())?;
    require_file(supported)?;
    require_writable_dir(data_dir)?;

    let glyph_dir = data_dir.join(&font.name);
    if !glyph_dir.is_dir() {
        log::debug!("Creating {}", glyph_dir.display());
        fs::create_dir_all(&glyph_dir).map_err(|e| Error::io(&glyph_dir, e))?;
    }

    let svg = read_svg_font(&font.svg())?;
    log::debug!(
        "SVG Data extracted: Family: {}, Units: {}, H-A-X: {}, Number of glyphs: {}",
        svg.face.family,
        svg.face.units_per_em,
        svg.face.default_horiz_adv_x,
        svg.glyphs.len()
    );

    let metadata = FontMetadata::load(&font.metadata())?;
    let mut registry = Registry::load(supported)?;
    let alternates = registry.alternates(&metadata);
    registry.merge(alternates);

    let written = output::write_symbols(&svg, &registry, &glyph_dir)?;
    log::debug!("Wrote {written} glyph files");

    let index = data_dir.join(format!("{}.xml", font.name));
    output::write_bounding_boxes(&svg, &registry, &metadata, &index)
}

/// Subset the font to the supported glyphs and write `<data>/<Font>.css`
/// embedding it as WOFF2.
pub fn generate_style(
    font: &FontSource,
    supported: &Path,
    data_dir: &Path,
    converter: &dyn FontConverter,
    keep_intermediates: bool,
) -> Result<PathBuf> {
    require_file(&font.svg())?;
    require_file(supported)?;
    require_writable_dir(data_dir)?;

    let registry = Registry::load_with_alternates(supported, &font.metadata())?;
    let keep_dir = keep_intermediates.then(|| font.intermediates());
    let css = subset_to_css(&font.svg(), &font.name, &registry, converter, keep_dir.as_deref())?;

    let path = data_dir.join(format!("{}.css", font.name));
    log::debug!("Writing CSS file {}", path.display());
    error::write(&path, css)?;
    Ok(path)
}

/// Convert any font the converter reads into `<font_file dir>/<name>.<ext>`.
pub fn convert_font(
    name: &str,
    font_file: &Path,
    format: FontFormat,
    converter: &dyn FontConverter,
) -> Result<PathBuf> {
    require_file(font_file)?;

    let epoch = source_date_epoch(font_file)?;
    let dir = font_file.parent().unwrap_or_else(|| Path::new("."));
    let output = dir.join(format!("{name}.{}", format.extension()));

    converter.convert(font_file, &output, Some(epoch))?;
    Ok(output)
}

/// Print which supported glyphs the font lacks, and optionally which font
/// glyphs are not supported.
pub fn check_coverage(
    font: &FontSource,
    supported: &Path,
    show_unsupported: bool,
    out: &mut impl Write,
) -> Result<CoverageReport> {
    require_file(&font.svg())?;
    require_file(supported)?;

    let registry = Registry::load_with_alternates(supported, &font.metadata())?;
    let svg = read_svg_font(&font.svg())?;
    let report = coverage::check_coverage(&registry, &svg);

    for line in report.lines(&font.name, show_unsupported) {
        writeln!(out, "{line}").map_err(|e| Error::io(Path::new("<stdout>"), e))?;
    }
    Ok(report)
}

// ─── Preconditions ───────────────────────────────────────────────────

fn require_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }
    fs::File::open(path)
        .map(|_| ())
        .map_err(|e| Error::read(path, e))
}

fn require_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }
    fs::read_dir(path)
        .map(|_| ())
        .map_err(|e| Error::read(path, e))
}

/// A directory is writable if an anonymous file can be created in it.
fn require_writable_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(Error::Unwritable {
            path: path.to_path_buf(),
        });
    }
    tempfile::tempfile_in(path)
        .map(|_| ())
        .map_err(|_| Error::Unwritable {
            path: path.to_path_buf(),
        })
}
