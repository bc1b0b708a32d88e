use std::collections::BTreeMap;

use crate::shared::geometry::{BoundingBox, NormalizedPoint};

use super::feature_group::{FeatureGroup, FeatureKind};

/// One detected face: where it sits in the photo and whichever feature
/// groups the detector reported for it.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    bounding_box: BoundingBox,
    groups: BTreeMap<FeatureKind, FeatureGroup>,
}

impl Face {
    pub fn new(bounding_box: BoundingBox) -> Self {
        Self {
            bounding_box,
            groups: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) the points for one feature group.
    pub fn with_group(mut self, kind: FeatureKind, points: Vec<NormalizedPoint>) -> Self {
        self.groups.insert(kind, FeatureGroup::new(kind, points));
        self
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    pub fn group(&self, kind: FeatureKind) -> Option<&FeatureGroup> {
        self.groups.get(&kind)
    }

    pub fn groups(&self) -> impl Iterator<Item = &FeatureGroup> {
        self.groups.values()
    }
}
