use std::sync::Arc;

use crate::landmarks::domain::face::Face;
use crate::landmarks::domain::landmark_detector::LandmarkDetector;
use crate::shared::photo::Photo;

/// Replays a landmark result that was computed once for a photo.
///
/// Slider changes re-compose the same photo many times; detection only needs
/// to run once, so the host caches the faces and hands this detector to the
/// compositor instead of the real one.
pub struct CachedLandmarkDetector {
    faces: Arc<Vec<Face>>,
}

impl CachedLandmarkDetector {
    pub fn new(faces: Arc<Vec<Face>>) -> Self {
        Self { faces }
    }

    /// Runs `detector` once and caches whatever it returns.
    pub fn prime(
        detector: &mut dyn LandmarkDetector,
        photo: &Photo,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let faces = detector.detect(photo)?;
        log::debug!("Cached {} detected face(s)", faces.len());
        Ok(Self::new(Arc::new(faces)))
    }
}

impl LandmarkDetector for CachedLandmarkDetector {
    fn detect(&mut self, photo: &Photo) -> Result<Vec<Face>, Box<dyn std::error::Error>> {
        if photo.is_empty() {
            return Err("Photo has no pixel data".into());
        }
        Ok(self.faces.as_ref().clone())
    }
}
