//! Planar point type.
//!
//! Lane geometry arrives in a projected, metre-based coordinate system, so
//! `Point` is a plain `(x, y)` pair rather than a lat/lon.  Values are kept
//! at full `f64` precision; integer rounding is an output concern.

/// A 2-D point in projected coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Ordered sequence of points describing a piecewise-linear geometry.
pub type Polyline = Vec<Point>;

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
