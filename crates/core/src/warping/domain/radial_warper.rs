use crate::shared::geometry::PixelPoint;
use crate::shared::photo::Photo;

/// Domain interface for a radial (bump) distortion filter.
///
/// Takes the photo by reference and returns a new one; the input is never
/// modified. A `strength` of 0 must return pixels identical to the input.
/// Positive strength pushes content outward from `center`, negative pulls
/// it inward. Only pixels closer than `radius` to `center` may change.
pub trait RadialWarper: Send + Sync {
    fn warp(
        &self,
        photo: &Photo,
        center: PixelPoint,
        radius: f64,
        strength: f64,
    ) -> Result<Photo, Box<dyn std::error::Error>>;
}
