//! Hand landmark data model.

use crate::defaults;
use crate::error::{Result, SigntypeError};

/// A single tracked keypoint on the hand, in normalized [0,1] coordinates.
///
/// The coordinate space is whatever the upstream extractor emits; no
/// mirroring or rotation correction happens downstream of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for Landmark {
    fn from(xy: [f32; 2]) -> Self {
        Self { x: xy[0], y: xy[1] }
    }
}

/// One hand's detected keypoints for a single frame.
///
/// Always holds exactly [`defaults::LANDMARK_COUNT`] points; frames without a
/// detected hand are represented upstream as an absent set, never as a short
/// one.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    points: Vec<Landmark>,
}

impl LandmarkSet {
    /// Creates a landmark set, rejecting any point count other than 21.
    pub fn new(points: Vec<Landmark>) -> Result<Self> {
        if points.len() != defaults::LANDMARK_COUNT {
            return Err(SigntypeError::LandmarkCount {
                expected: defaults::LANDMARK_COUNT,
                actual: points.len(),
            });
        }
        Ok(Self { points })
    }

    /// The points in extractor order (wrist first, then per-finger joints).
    pub fn points(&self) -> &[Landmark] {
        &self.points
    }
}

impl TryFrom<Vec<[f32; 2]>> for LandmarkSet {
    type Error = SigntypeError;

    fn try_from(raw: Vec<[f32; 2]>) -> Result<Self> {
        Self::new(raw.into_iter().map(Landmark::from).collect())
    }
}

/// A valid 21-point set with distinguishable coordinates, shared by several
/// modules' tests.
#[cfg(test)]
pub(crate) fn sample_set() -> LandmarkSet {
    let points = (0..defaults::LANDMARK_COUNT)
        .map(|i| Landmark::new(i as f32 * 0.01, i as f32 * 0.02))
        .collect();
    LandmarkSet::new(points).expect("sample set has 21 points")
}
