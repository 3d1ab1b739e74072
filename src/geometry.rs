//! Outline bounds via `kurbo`.

use kurbo::{BezPath, Shape};

use crate::error::{Error, Result};
use crate::model::BoundingBox;

/// Exact extrema of an SVG path: `(xmin, xmax, ymin, ymax)`.
pub fn path_extrema(d: &str) -> std::result::Result<(f64, f64, f64, f64), String> {
    let path = BezPath::from_svg(d).map_err(|e| e.to_string())?;
    let rect = path.bounding_box();
    Ok((rect.x0, rect.x1, rect.y0, rect.y1))
}

/// Bounding box of a glyph outline; [`BoundingBox::EMPTY`] without one.
pub fn glyph_bounds(code: &str, outline: Option<&str>) -> Result<BoundingBox> {
    let Some(d) = outline else {
        return Ok(BoundingBox::EMPTY);
    };
    let (xmin, xmax, ymin, ymax) = path_extrema(d).map_err(|message| Error::Geometry {
        code: code.to_string(),
        message,
    })?;
    Ok(BoundingBox::from_extrema(xmin, xmax, ymin, ymax))
}
