//! Generated files — the C++ header, per-glyph symbols, the bounding-box
//! index and the CSS font-face declaration.
//!
//! Each module keeps formatting (`render_*`, pure) apart from writing
//! (`write_*`, I/O only).

mod xml_builder;

pub mod bounding_boxes;
pub mod css;
pub mod header;
pub mod symbols;

pub(crate) use xml_builder::{escape_text, XML_DECLARATION};

pub use bounding_boxes::{render_bounding_boxes, write_bounding_boxes};
pub use css::{render_font_face, subset_license};
pub use header::{render_header, write_header, HEADER_FILE_NAME};
pub use symbols::{render_symbol, write_symbols, SYMBOL_EXTENSION};
