//! Feature encoding: landmark sets to classifier input vectors.

use crate::defaults::FEATURE_LEN;
use crate::landmark::LandmarkSet;

/// Flattened numeric input to the scoring model.
///
/// For landmark index `i`, positions `2i` and `2i+1` hold that landmark's x
/// and y. Values stay in the extractor's normalized coordinate space; the
/// encoder performs no scaling or cropping.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector([f32; FEATURE_LEN]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub const fn len(&self) -> usize {
        FEATURE_LEN
    }

    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl From<[f32; FEATURE_LEN]> for FeatureVector {
    fn from(values: [f32; FEATURE_LEN]) -> Self {
        Self(values)
    }
}

/// Encodes a landmark set into the classifier's fixed-length input.
///
/// Total function: a `LandmarkSet` is only constructible with exactly 21
/// points, so encoding cannot fail.
pub fn encode(landmarks: &LandmarkSet) -> FeatureVector {
    let mut values = [0.0f32; FEATURE_LEN];
    for (i, point) in landmarks.points().iter().enumerate() {
        values[2 * i] = point.x;
        values[2 * i + 1] = point.y;
    }
    FeatureVector(values)
}
