//! smufl_fonts — builds the SMuFL font assets of a music notation engine.
//!
//! From a `supported.xml` glyph list and an SVG font it produces:
//!   - `smufl.h`, the C++ enumeration of supported glyphs
//!   - one `<symbol>` file per supported glyph
//!   - a bounding-box index with glyph advances and anchors
//!   - a CSS `@font-face` declaration embedding a subset WOFF2 font
//!
//! # Example
//! ```no_run
//! use smufl_fonts::{read_svg_font, render_bounding_boxes, FontMetadata, Registry};
//! use std::path::Path;
//!
//! let registry = Registry::load(Path::new("supported.xml")).unwrap();
//! let metadata = FontMetadata::load(Path::new("Leipzig/leipzig_metadata.json")).unwrap();
//! let font = read_svg_font(Path::new("Leipzig/Leipzig.svg")).unwrap();
//! let xml = render_bounding_boxes(&font, &registry, &metadata).unwrap();
//! println!("{xml}");
//! ```

pub mod commands;
pub mod converter;
pub mod coverage;
pub mod error;
pub mod geometry;
pub mod metadata;
pub mod model;
pub mod output;
pub mod parser;
pub mod registry;
pub mod subset;

pub use converter::{FontConverter, FontForge, FontFormat};
pub use coverage::CoverageReport;
pub use error::{Error, Result};
pub use metadata::FontMetadata;
pub use model::*;
pub use output::{render_bounding_boxes, render_header, render_symbol};
pub use parser::read_svg_font;
pub use registry::Registry;
