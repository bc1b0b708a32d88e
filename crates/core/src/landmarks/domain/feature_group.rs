//! Anatomical feature groups reported by a landmark detector.

use serde::{Deserialize, Serialize};

use crate::shared::geometry::NormalizedPoint;

/// One named facial region.
///
/// The declaration order is the canonical warp order (see [`FeatureKind::ALL`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    LeftEyebrow,
    RightEyebrow,
    LeftEye,
    RightEye,
    Nose,
    OuterLips,
    FaceContour,
}

impl FeatureKind {
    /// Every group, in the order warps are applied.
    ///
    /// Bump warps do not commute where their discs overlap, so this order is
    /// part of the output.
    pub const ALL: &[FeatureKind] = &[
        FeatureKind::LeftEyebrow,
        FeatureKind::RightEyebrow,
        FeatureKind::LeftEye,
        FeatureKind::RightEye,
        FeatureKind::Nose,
        FeatureKind::OuterLips,
        FeatureKind::FaceContour,
    ];

    /// [`FeatureKind::ALL`] minus the eyebrows.
    pub const WITHOUT_BROWS: &[FeatureKind] = &[
        FeatureKind::LeftEye,
        FeatureKind::RightEye,
        FeatureKind::Nose,
        FeatureKind::OuterLips,
        FeatureKind::FaceContour,
    ];

    /// The user-facing scale shared by this group (left/right pairs share one).
    pub fn scale_group(self) -> ScaleGroup {
        match self {
            FeatureKind::LeftEyebrow | FeatureKind::RightEyebrow => ScaleGroup::Brows,
            FeatureKind::LeftEye | FeatureKind::RightEye => ScaleGroup::Eyes,
            FeatureKind::Nose => ScaleGroup::Nose,
            FeatureKind::OuterLips => ScaleGroup::Lips,
            FeatureKind::FaceContour => ScaleGroup::FaceContour,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FeatureKind::LeftEyebrow => "left_eyebrow",
            FeatureKind::RightEyebrow => "right_eyebrow",
            FeatureKind::LeftEye => "left_eye",
            FeatureKind::RightEye => "right_eye",
            FeatureKind::Nose => "nose",
            FeatureKind::OuterLips => "outer_lips",
            FeatureKind::FaceContour => "face_contour",
        }
    }
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/// A strength control shared by one or more [`FeatureKind`]s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleGroup {
    Brows,
    Eyes,
    Nose,
    Lips,
    FaceContour,
}

impl ScaleGroup {
    pub const ALL: &[ScaleGroup] = &[
        ScaleGroup::Brows,
        ScaleGroup::Eyes,
        ScaleGroup::Nose,
        ScaleGroup::Lips,
        ScaleGroup::FaceContour,
    ];

    /// Range offered by the editor's slider for this group.
    pub fn slider_range(self) -> (f64, f64) {
        match self {
            ScaleGroup::Eyes | ScaleGroup::Lips => (0.0, 1.0),
            ScaleGroup::Nose | ScaleGroup::Brows => (0.0, 1.5),
            ScaleGroup::FaceContour => (0.0, 0.5),
        }
    }
}

impl std::fmt::Display for ScaleGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleGroup::Brows => write!(f, "brows"),
            ScaleGroup::Eyes => write!(f, "eyes"),
            ScaleGroup::Nose => write!(f, "nose"),
            ScaleGroup::Lips => write!(f, "lips"),
            ScaleGroup::FaceContour => write!(f, "face_contour"),
        }
    }
}

/// The landmark points of one region, in detector order.
///
/// Order carries no meaning for warping; only the point set matters.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureGroup {
    kind: FeatureKind,
    points: Vec<NormalizedPoint>,
}

impl FeatureGroup {
    pub fn new(kind: FeatureKind, points: Vec<NormalizedPoint>) -> Self {
        Self { kind, points }
    }

    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    pub fn points(&self) -> &[NormalizedPoint] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_all_order_is_declaration_order() {
        let mut sorted = FeatureKind::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, FeatureKind::ALL);
        assert_eq!(FeatureKind::ALL.len(), 7);
    }

    #[test]
    fn test_without_brows_is_all_minus_brows() {
        let expected: Vec<_> = FeatureKind::ALL
            .iter()
            .copied()
            .filter(|k| k.scale_group() != ScaleGroup::Brows)
            .collect();
        assert_eq!(FeatureKind::WITHOUT_BROWS, expected.as_slice());
    }

    #[rstest]
    #[case::left_brow(FeatureKind::LeftEyebrow, ScaleGroup::Brows)]
    #[case::right_brow(FeatureKind::RightEyebrow, ScaleGroup::Brows)]
    #[case::left_eye(FeatureKind::LeftEye, ScaleGroup::Eyes)]
    #[case::right_eye(FeatureKind::RightEye, ScaleGroup::Eyes)]
    #[case::nose(FeatureKind::Nose, ScaleGroup::Nose)]
    #[case::lips(FeatureKind::OuterLips, ScaleGroup::Lips)]
    #[case::contour(FeatureKind::FaceContour, ScaleGroup::FaceContour)]
    fn test_scale_group_mapping(#[case] kind: FeatureKind, #[case] expected: ScaleGroup) {
        assert_eq!(kind.scale_group(), expected);
    }

    #[test]
    fn test_serde_name_matches_display() {
        for kind in FeatureKind::ALL {
            let json = serde_json::to_string(kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }

    #[test]
    fn test_slider_ranges_start_at_zero() {
        for group in ScaleGroup::ALL {
            let (lo, hi) = group.slider_range();
            assert_eq!(lo, 0.0);
            assert!(hi > lo);
        }
    }

    #[test]
    fn test_feature_group_accessors() {
        let group = FeatureGroup::new(FeatureKind::Nose, vec![NormalizedPoint::new(0.5, 0.5)]);
        assert_eq!(group.kind(), FeatureKind::Nose);
        assert_eq!(group.points().len(), 1);
    }
}
