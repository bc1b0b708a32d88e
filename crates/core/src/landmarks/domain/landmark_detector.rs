use crate::shared::photo::Photo;

use super::face::Face;

/// Domain interface for facial landmark detection.
///
/// `Ok(vec![])` means the detector ran and found nothing; `Err` means the
/// detector itself failed. Implementations may keep state, hence `&mut self`.
pub trait LandmarkDetector: Send {
    fn detect(&mut self, photo: &Photo) -> Result<Vec<Face>, Box<dyn std::error::Error>>;
}
