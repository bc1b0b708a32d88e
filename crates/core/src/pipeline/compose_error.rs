use thiserror::Error;

use crate::landmarks::domain::feature_group::FeatureKind;

/// Why a composition produced no image.
///
/// Every variant is terminal for the call: there is no partial output and
/// no fallback to the unedited photo.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComposeError {
    /// The detector ran successfully and found nothing.
    #[error("no face detected")]
    NoFaceDetected,
    #[error("landmark detection failed: {0}")]
    DetectorFailure(String),
    #[error("warp failed for {group} on face {face_index}: {message}")]
    WarpFilterFailure {
        group: FeatureKind,
        face_index: usize,
        message: String,
    },
    #[error("failed to render output: {0}")]
    RenderFailure(String),
    /// Detector reported a group with no points.
    #[error("{group} on face {face_index} has no points")]
    EmptyFeatureGroup { group: FeatureKind, face_index: usize },
}
