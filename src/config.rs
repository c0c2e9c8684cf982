//! Classifier hyper-parameters and their validation into an untrained classifier.

use crate::error::Result;
use crate::knn::{KnnClassifier, KnnDistance};

/// Hyper-parameters of a KNN classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KnnConfig {
    pub k: usize,
    pub distance: KnnDistance,
}

impl KnnConfig {
    pub fn new(k: usize, distance: KnnDistance) -> Self {
        Self { k, distance }
    }

    /// Builds an untrained classifier, validating `k`.
    pub fn build(&self) -> Result<KnnClassifier> {
        Ok(KnnClassifier::new(self.k)?.with_distance(self.distance))
    }
}

impl Default for KnnConfig {
    fn default() -> Self {
        Self { k: 1, distance: KnnDistance::Euclidean }
    }
}
