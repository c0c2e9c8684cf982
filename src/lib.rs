//! Deterministic exact k-nearest-neighbors classification.
//!
//! A [`Dataset`] holds immutable feature rows with a target class. A
//! [`KnnClassifier`] is trained on one dataset once and then classifies rows,
//! safely from many threads at a time. The [`io`] module loads datasets from
//! CSV files and [`evaluation`] runs parallel batch classification and
//! accuracy measurement on top of the classifier.

pub mod common_types;
pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod io;
pub mod knn;
pub mod logging;
#[cfg(feature = "python")]
mod python;

pub use common_types::{Class, Row};
pub use config::KnnConfig;
pub use dataset::Dataset;
pub use error::{KnnError, Result};
pub use knn::{Classifier, KnnClassifier, KnnDistance, Neighbor};
