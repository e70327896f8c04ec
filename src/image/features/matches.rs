use serde::{Serialize, Deserialize};
use crate::Float;

/// Index pair into a source and a destination feature set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatch {
    pub source_idx: usize,
    pub destination_idx: usize,
    pub distance: Float
}

impl FeatureMatch {
    pub fn new(source_idx: usize, destination_idx: usize, distance: Float) -> FeatureMatch {
        FeatureMatch { source_idx, destination_idx, distance }
    }
}
