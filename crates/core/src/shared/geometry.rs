//! Coordinate value types.
//!
//! Landmark points exist in two spaces: normalized (fractions of a face
//! bounding box) and pixel (absolute photo coordinates). They are separate
//! types so a normalized point can never reach the pixel-space warp filter
//! by accident; [`NormalizedPoint::to_pixel`] is the only conversion.

use serde::{Deserialize, Serialize};

/// A landmark position relative to a face bounding box, nominally in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Maps this point into pixel space of a photo of the given extent.
    ///
    /// No clamping: out-of-range detector output moves the point outside
    /// the box (or the photo) instead of being rejected.
    pub fn to_pixel(self, bounding_box: &BoundingBox, extent: Extent) -> PixelPoint {
        PixelPoint::new(
            (bounding_box.x + self.x * bounding_box.width) * extent.width,
            (bounding_box.y + self.y * bounding_box.height) * extent.height,
        )
    }
}

impl From<(f64, f64)> for NormalizedPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<NormalizedPoint> for (f64, f64) {
    fn from(p: NormalizedPoint) -> Self {
        (p.x, p.y)
    }
}

/// An absolute position in a photo, origin top-left, y pointing down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &PixelPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned face rectangle in normalized photo coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole photo.
    pub const fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }
}

/// Photo size in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
