//! Sequential composition of per-feature bump warps into one output image.

use image::DynamicImage;

use crate::landmarks::domain::face::Face;
use crate::landmarks::domain::feature_group::FeatureKind;
use crate::landmarks::domain::landmark_detector::LandmarkDetector;
use crate::shared::geometry::Extent;
use crate::shared::photo::Photo;
use crate::warping::domain::radial_warper::RadialWarper;
use crate::warping::domain::warp_target::{WarpSpec, WarpTarget};

use super::compose_error::ComposeError;
use super::feature_scales::FeatureScales;

/// One warp to apply: which face, which feature group, and where.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WarpStep {
    pub face_index: usize,
    pub group: FeatureKind,
    pub spec: WarpSpec,
}

/// Applies one radial warp per (face, feature group) pair, in a fixed order.
///
/// Faces are visited in detector order and, within a face, groups in the
/// order given at construction. Each warp reads the previous warp's output,
/// so where two discs overlap the order is visible in the result.
pub struct WarpCompositor {
    warper: Box<dyn RadialWarper>,
    groups: &'static [FeatureKind],
}

impl WarpCompositor {
    /// Compositor over every feature group, in [`FeatureKind::ALL`] order.
    pub fn new(warper: Box<dyn RadialWarper>) -> Self {
        Self::with_groups(warper, FeatureKind::ALL)
    }

    pub fn with_groups(warper: Box<dyn RadialWarper>, groups: &'static [FeatureKind]) -> Self {
        Self { warper, groups }
    }

    pub fn groups(&self) -> &'static [FeatureKind] {
        self.groups
    }

    /// Computes the ordered warp steps without touching pixels.
    ///
    /// Absent groups and groups whose scale is 0 produce no step.
    pub fn plan(
        &self,
        faces: &[Face],
        extent: Extent,
        scales: &FeatureScales,
    ) -> Result<Vec<WarpStep>, ComposeError> {
        if faces.is_empty() {
            return Err(ComposeError::NoFaceDetected);
        }

        let mut steps = Vec::new();
        for (face_index, face) in faces.iter().enumerate() {
            for &kind in self.groups {
                let Some(group) = face.group(kind) else {
                    continue;
                };
                let strength = scales.for_feature(kind);
                if strength == 0.0 {
                    continue;
                }
                let target = WarpTarget::from_group(group, face.bounding_box(), extent)
                    .map_err(|_| ComposeError::EmptyFeatureGroup {
                        group: kind,
                        face_index,
                    })?;
                steps.push(WarpStep {
                    face_index,
                    group: kind,
                    spec: WarpSpec { target, strength },
                });
            }
        }
        Ok(steps)
    }

    /// Warps `photo` for every planned step and renders the result.
    pub fn compose(
        &self,
        photo: &Photo,
        faces: &[Face],
        scales: &FeatureScales,
    ) -> Result<DynamicImage, ComposeError> {
        let steps = self.plan(faces, photo.extent(), scales)?;
        log::debug!(
            "Composing {} warp step(s) over {} face(s)",
            steps.len(),
            faces.len()
        );

        let mut current: Option<Photo> = None;
        for step in &steps {
            let source = current.as_ref().unwrap_or(photo);
            let next = self.apply(source, step)?;
            current = Some(next);
        }

        render(current.unwrap_or_else(|| photo.clone()))
    }

    /// Runs `detector` on `photo`, then composes over whatever it found.
    ///
    /// A detector error short-circuits before any warp runs.
    pub fn compose_detected(
        &self,
        photo: &Photo,
        detector: &mut dyn LandmarkDetector,
        scales: &FeatureScales,
    ) -> Result<DynamicImage, ComposeError> {
        let faces = detector
            .detect(photo)
            .map_err(|e| ComposeError::DetectorFailure(e.to_string()))?;
        self.compose(photo, &faces, scales)
    }

    fn apply(&self, source: &Photo, step: &WarpStep) -> Result<Photo, ComposeError> {
        let WarpSpec { target, strength } = step.spec;
        log::debug!(
            "Warping {} on face {}: center=({:.1}, {:.1}) radius={:.1} strength={}",
            step.group,
            step.face_index,
            target.center.x,
            target.center.y,
            target.radius,
            strength
        );

        let failure = |message: String| ComposeError::WarpFilterFailure {
            group: step.group,
            face_index: step.face_index,
            message,
        };

        let next = self
            .warper
            .warp(source, target.center, target.radius, strength)
            .map_err(|e| failure(e.to_string()))?;

        if (next.width(), next.height(), next.channels())
            != (source.width(), source.height(), source.channels())
        {
            return Err(failure(format!(
                "warper returned {}x{}x{}, expected {}x{}x{}",
                next.width(),
                next.height(),
                next.channels(),
                source.width(),
                source.height(),
                source.channels()
            )));
        }
        Ok(next)
    }
}

/// Materializes the final photo as an `image` buffer.
pub fn render(photo: Photo) -> Result<DynamicImage, ComposeError> {
    if photo.is_empty() {
        return Err(ComposeError::RenderFailure(format!(
            "photo has zero extent ({}x{})",
            photo.width(),
            photo.height()
        )));
    }

    let (width, height, channels) = (photo.width(), photo.height(), photo.channels());
    let data = photo.into_data();
    let rendered = match channels {
        1 => image::GrayImage::from_raw(width, height, data).map(DynamicImage::ImageLuma8),
        3 => image::RgbImage::from_raw(width, height, data).map(DynamicImage::ImageRgb8),
        4 => image::RgbaImage::from_raw(width, height, data).map(DynamicImage::ImageRgba8),
        n => {
            return Err(ComposeError::RenderFailure(format!(
                "unsupported channel count {n}"
            )))
        }
    };
    rendered.ok_or_else(|| {
        ComposeError::RenderFailure("pixel buffer does not match dimensions".to_string())
    })
}
