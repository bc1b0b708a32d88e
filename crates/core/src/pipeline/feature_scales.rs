use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::landmarks::domain::feature_group::{FeatureKind, ScaleGroup};

#[derive(Error, Debug)]
pub enum ScalesError {
    #[error("failed to read scales from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write scales to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scales config: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Signed warp strength per user-facing feature control.
///
/// Missing keys deserialize to 0, which leaves that feature untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeatureScales {
    pub brows: f64,
    pub eyes: f64,
    pub nose: f64,
    pub lips: f64,
    #[serde(alias = "faceContour")]
    pub face_contour: f64,
}

impl FeatureScales {
    pub fn get(&self, group: ScaleGroup) -> f64 {
        match group {
            ScaleGroup::Brows => self.brows,
            ScaleGroup::Eyes => self.eyes,
            ScaleGroup::Nose => self.nose,
            ScaleGroup::Lips => self.lips,
            ScaleGroup::FaceContour => self.face_contour,
        }
    }

    pub fn set(&mut self, group: ScaleGroup, value: f64) {
        let slot = match group {
            ScaleGroup::Brows => &mut self.brows,
            ScaleGroup::Eyes => &mut self.eyes,
            ScaleGroup::Nose => &mut self.nose,
            ScaleGroup::Lips => &mut self.lips,
            ScaleGroup::FaceContour => &mut self.face_contour,
        };
        *slot = value;
    }

    pub fn with(mut self, group: ScaleGroup, value: f64) -> Self {
        self.set(group, value);
        self
    }

    /// Strength for one feature group; paired groups share a value.
    pub fn for_feature(&self, kind: FeatureKind) -> f64 {
        self.get(kind.scale_group())
    }

    /// True when every control is at rest.
    pub fn is_identity(&self) -> bool {
        ScaleGroup::ALL.iter().all(|g| self.get(*g) == 0.0)
    }

    /// Controls set outside the editor's slider range.
    pub fn out_of_range(&self) -> Vec<(ScaleGroup, f64)> {
        ScaleGroup::ALL
            .iter()
            .filter_map(|&g| {
                let value = self.get(g);
                let (lo, hi) = g.slider_range();
                (value < lo || value > hi).then_some((g, value))
            })
            .collect()
    }

    /// Logs a warning for each out-of-range control. Values are still used.
    pub fn warn_out_of_range(&self) {
        for (group, value) in self.out_of_range() {
            let (lo, hi) = group.slider_range();
            log::warn!("{group} scale {value} is outside the usual range {lo}..={hi}");
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ScalesError> {
        serde_json::from_str(json).map_err(ScalesError::Parse)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ScalesError> {
        let json = fs::read_to_string(path).map_err(|source| ScalesError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn save(&self, path: &Path) -> Result<(), ScalesError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ScalesError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(ScalesError::Parse)?;
        fs::write(path, json).map_err(|source| ScalesError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_default_is_identity() {
        assert!(FeatureScales::default().is_identity());
    }

    #[test]
    fn test_missing_keys_default_to_zero() {
        let scales = FeatureScales::from_json_str(r#"{"nose": 0.3}"#).unwrap();
        assert_relative_eq!(scales.nose, 0.3);
        assert_relative_eq!(scales.eyes, 0.0);
        assert_relative_eq!(scales.brows, 0.0);
        assert_relative_eq!(scales.lips, 0.0);
        assert_relative_eq!(scales.face_contour, 0.0);
    }

    #[test]
    fn test_camel_case_face_contour_alias() {
        let scales = FeatureScales::from_json_str(r#"{"faceContour": 0.2}"#).unwrap();
        assert_relative_eq!(scales.face_contour, 0.2);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(
            FeatureScales::from_json_str(r#"{"ears": 1.0}"#),
            Err(ScalesError::Parse(_))
        ));
    }

    #[rstest]
    #[case::left_brow(FeatureKind::LeftEyebrow, 0.1)]
    #[case::right_brow(FeatureKind::RightEyebrow, 0.1)]
    #[case::left_eye(FeatureKind::LeftEye, 0.2)]
    #[case::right_eye(FeatureKind::RightEye, 0.2)]
    #[case::nose(FeatureKind::Nose, 0.3)]
    #[case::lips(FeatureKind::OuterLips, 0.4)]
    #[case::contour(FeatureKind::FaceContour, 0.5)]
    fn test_for_feature_uses_shared_group(#[case] kind: FeatureKind, #[case] expected: f64) {
        let scales = FeatureScales {
            brows: 0.1,
            eyes: 0.2,
            nose: 0.3,
            lips: 0.4,
            face_contour: 0.5,
        };
        assert_relative_eq!(scales.for_feature(kind), expected);
    }

    #[test]
    fn test_with_sets_single_group() {
        let scales = FeatureScales::default().with(ScaleGroup::Lips, -0.25);
        assert_relative_eq!(scales.lips, -0.25);
        assert!(!scales.is_identity());
    }

    #[test]
    fn test_out_of_range_reports_offenders() {
        let scales = FeatureScales::default()
            .with(ScaleGroup::Eyes, 1.2)
            .with(ScaleGroup::Nose, 1.5)
            .with(ScaleGroup::FaceContour, -0.1);
        let offenders = scales.out_of_range();
        assert_eq!(offenders.len(), 2);
        assert_eq!(offenders[0].0, ScaleGroup::Eyes);
        assert_eq!(offenders[1].0, ScaleGroup::FaceContour);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("scales.json");
        let scales = FeatureScales::default().with(ScaleGroup::Eyes, 0.6);
        scales.save(&path).unwrap();
        assert_eq!(FeatureScales::from_json_file(&path).unwrap(), scales);
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let err = FeatureScales::from_json_file(Path::new("/nonexistent/scales.json")).unwrap_err();
        assert!(matches!(err, ScalesError::Read { .. }));
    }
}
