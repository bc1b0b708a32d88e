//! Geometry extraction: feature group points → warp center and radius.

use thiserror::Error;

use crate::landmarks::domain::feature_group::FeatureGroup;
use crate::shared::constants::RADIUS_MARGIN_PX;
use crate::shared::geometry::{BoundingBox, Extent, NormalizedPoint, PixelPoint};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("feature group has no points")]
    EmptyPointSet,
}

/// Where a single bump warp is centred and how far it reaches, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WarpTarget {
    pub center: PixelPoint,
    /// Always > 0: extent of the point set plus [`RADIUS_MARGIN_PX`].
    pub radius: f64,
}

impl WarpTarget {
    /// Unnormalizes the group's points and derives the target from them.
    pub fn from_group(
        group: &FeatureGroup,
        bounding_box: &BoundingBox,
        extent: Extent,
    ) -> Result<Self, GeometryError> {
        let pixels = unnormalize(group.points(), bounding_box, extent);
        Self::from_pixels(&pixels)
    }

    pub fn from_pixels(points: &[PixelPoint]) -> Result<Self, GeometryError> {
        Ok(Self {
            center: compute_center(points)?,
            radius: compute_radius(points)?,
        })
    }
}

/// A warp target paired with the signed strength to apply there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WarpSpec {
    pub target: WarpTarget,
    pub strength: f64,
}

/// Converts box-relative normalized points into photo pixel coordinates.
pub fn unnormalize(
    points: &[NormalizedPoint],
    bounding_box: &BoundingBox,
    extent: Extent,
) -> Vec<PixelPoint> {
    points
        .iter()
        .map(|p| p.to_pixel(bounding_box, extent))
        .collect()
}

/// Arithmetic mean of the points, per axis.
pub fn compute_center(points: &[PixelPoint]) -> Result<PixelPoint, GeometryError> {
    if points.is_empty() {
        return Err(GeometryError::EmptyPointSet);
    }
    let n = points.len() as f64;
    let (sum_x, sum_y) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Ok(PixelPoint::new(sum_x / n, sum_y / n))
}

/// Larger side of the points' axis-aligned bounds, plus the margin.
pub fn compute_radius(points: &[PixelPoint]) -> Result<f64, GeometryError> {
    let first = points.first().ok_or(GeometryError::EmptyPointSet)?;
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    Ok((max_x - min_x).max(max_y - min_y) + RADIUS_MARGIN_PX)
}
