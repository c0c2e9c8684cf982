//! Exact k-nearest-neighbors classification.
//!
//! A [`KnnClassifier`] is built with `k`, trained once on a [`Dataset`] and then
//! answers classification queries. Training copies the dataset into an owned
//! snapshot; after that the classifier is only read, so `&KnnClassifier` can
//! be shared across threads and `classify` called from all of them at once.

pub mod distance;
pub mod heap_utils;
pub mod vote;

pub use distance::KnnDistance;
pub use heap_utils::Neighbor;

use crate::common_types::{Class, Row};
use crate::dataset::Dataset;
use crate::error::{KnnError, Result};
use heap_utils::KBestNeighbors;

/// The contract a classifier exposes to evaluation code.
pub trait Classifier {
    /// Trains the classifier. Valid once per instance.
    fn train(&mut self, dataset: &Dataset) -> Result<()>;

    /// Predicts the class of a single row.
    fn classify(&self, row: &Row) -> Result<Class>;

    /// Optional human readable name for the classifier
    fn name(&self) -> &str {
        "classifier"
    }
}

/// Training data owned by a trained classifier. Never mutated after `train`.
#[derive(Debug)]
struct TrainingSnapshot {
    /// Row-major features, `num_features` values per training row.
    features: Vec<f64>,
    targets: Vec<Class>,
    num_features: usize,
}

impl TrainingSnapshot {
    fn capture(dataset: &Dataset) -> Result<Self> {
        let num_features = dataset.num_features();
        let mut features = Vec::with_capacity(dataset.num_rows() * num_features);
        let mut targets = Vec::with_capacity(dataset.num_rows());

        for (i, row) in dataset.iter().enumerate() {
            let target = row
                .target()
                .ok_or_else(|| KnnError::Schema(format!("training row {} has no target", i)))?;
            features.extend_from_slice(row.features());
            targets.push(target.clone());
        }

        Ok(TrainingSnapshot { features, targets, num_features })
    }

    fn num_rows(&self) -> usize {
        self.targets.len()
    }

    fn row_features(&self, index: usize) -> &[f64] {
        let start = index * self.num_features;
        &self.features[start..start + self.num_features]
    }
}

/// The K-Nearest Neighbors Classifier.
///
/// Neighbors are ranked by `(distance, training index)`, so equidistant rows
/// resolve to the one that came first in the training dataset. If `k` exceeds
/// the number of training rows every training row is consulted.
#[derive(Debug)]
pub struct KnnClassifier {
    k: usize,
    distance: KnnDistance,
    snapshot: Option<TrainingSnapshot>,
}

impl KnnClassifier {
    /// Creates an untrained classifier consulting `k` neighbors under Euclidean distance.
    pub fn new(k: usize) -> Result<Self> {
        if k < 1 {
            return Err(KnnError::InvalidParameter(format!("k must be at least 1, got {}", k)));
        }
        Ok(KnnClassifier { k, distance: KnnDistance::default(), snapshot: None })
    }

    /// Replaces the distance metric.
    pub fn with_distance(mut self, distance: KnnDistance) -> Self {
        self.distance = distance;
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn distance(&self) -> KnnDistance {
        self.distance
    }

    pub fn is_trained(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Number of training rows, zero before training.
    pub fn num_training_rows(&self) -> usize {
        self.snapshot.as_ref().map_or(0, TrainingSnapshot::num_rows)
    }

    /// Feature width of the training data, if trained.
    pub fn num_features(&self) -> Option<usize> {
        self.snapshot.as_ref().map(|snapshot| snapshot.num_features)
    }

    /// Captures a copy of `dataset` as the training snapshot.
    ///
    /// Fails with `AlreadyTrained` on a second call; the snapshot is never
    /// replaced once set.
    pub fn train(&mut self, dataset: &Dataset) -> Result<()> {
        if self.snapshot.is_some() {
            return Err(KnnError::AlreadyTrained);
        }
        if dataset.is_empty() {
            return Err(KnnError::EmptyDataset);
        }

        let snapshot = TrainingSnapshot::capture(dataset)?;
        log::debug!(
            "trained knn classifier: k={}, distance={}, {} rows, {} features",
            self.k,
            self.distance,
            snapshot.num_rows(),
            snapshot.num_features
        );
        self.snapshot = Some(snapshot);
        Ok(())
    }

    /// Predicts the class of `row`. The row's own target, if any, is ignored.
    pub fn classify(&self, row: &Row) -> Result<Class> {
        self.classify_features(row.features())
    }

    pub fn classify_features(&self, features: &[f64]) -> Result<Class> {
        let snapshot = self.snapshot.as_ref().ok_or(KnnError::NotTrained)?;
        let neighbors = self.search(snapshot, features)?;
        let predicted = vote::majority_vote(neighbors.iter().map(|n| &snapshot.targets[n.index]))
            .ok_or(KnnError::EmptyDataset)?;
        Ok(predicted.clone())
    }

    /// The neighbors `classify_features` would vote with, nearest first.
    pub fn nearest_neighbors(&self, features: &[f64]) -> Result<Vec<Neighbor>> {
        let snapshot = self.snapshot.as_ref().ok_or(KnnError::NotTrained)?;
        self.search(snapshot, features)
    }

    /// Brute-force scan over every training row.
    fn search(&self, snapshot: &TrainingSnapshot, features: &[f64]) -> Result<Vec<Neighbor>> {
        if features.len() != snapshot.num_features {
            return Err(KnnError::Dimension { expected: snapshot.num_features, found: features.len() });
        }

        let k = self.k.min(snapshot.num_rows());
        let mut best = KBestNeighbors::new(k);
        for index in 0..snapshot.num_rows() {
            let distance = self.distance.compute(features, snapshot.row_features(index));
            // Rows are visited in index order, so a row no closer than the current
            // worst can never displace it.
            if best.current_farthest_distance().is_some_and(|farthest| distance >= farthest) {
                continue;
            }
            best.add(distance, index);
        }
        Ok(best.into_sorted_neighbors())
    }
}

impl Classifier for KnnClassifier {
    fn train(&mut self, dataset: &Dataset) -> Result<()> {
        KnnClassifier::train(self, dataset)
    }

    fn classify(&self, row: &Row) -> Result<Class> {
        KnnClassifier::classify(self, row)
    }

    fn name(&self) -> &str {
        "knn"
    }
}
