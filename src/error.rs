//! Error type shared by every fallible operation in the crate.

use std::io;

/// Errors surfaced by dataset construction, training and classification.
#[derive(Debug, thiserror::Error)]
pub enum KnnError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("cannot train on an empty dataset")]
    EmptyDataset,

    #[error("classifier has not been trained")]
    NotTrained,

    #[error("classifier has already been trained")]
    AlreadyTrained,

    #[error("dimension mismatch: expected {expected} features, found {found}")]
    Dimension { expected: usize, found: usize },

    #[error("schema validation failed: {0}")]
    Schema(String),

    #[error("row index {index} out of range for dataset with {len} rows")]
    Index { index: usize, len: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenient alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, KnnError>;
