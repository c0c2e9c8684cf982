//! Batch classification and accuracy measurement over a trained classifier.
//!
//! Parallel classification maps independent `classify` calls over the rows of
//! a dataset with rayon and collects the results in row order; no state is
//! shared between the calls besides the read-only classifier.

use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::common_types::Class;
use crate::dataset::Dataset;
use crate::error::{KnnError, Result};
use crate::knn::Classifier;

/// Classifies every row of `dataset` on the calling thread.
pub fn classify_all<C: Classifier + ?Sized>(classifier: &C, dataset: &Dataset) -> Result<Vec<Class>> {
    dataset.iter().map(|row| classifier.classify(row)).collect()
}

/// Classifies every row of `dataset` in parallel on the current rayon pool.
///
/// Predictions are returned in row order. If any row fails, the error of the
/// lowest failing row index is returned.
pub fn par_classify_all<C: Classifier + Sync + ?Sized>(classifier: &C, dataset: &Dataset) -> Result<Vec<Class>> {
    let results: Vec<Result<Class>> = dataset.rows().par_iter().map(|row| classifier.classify(row)).collect();
    results.into_iter().collect()
}

/// Fraction of `predictions` equal to the targets of `dataset`, row by row.
pub fn accuracy(predictions: &[Class], dataset: &Dataset) -> Result<f64> {
    Ok(count_correct(predictions, dataset)? as f64 / dataset.num_rows() as f64)
}

fn count_correct(predictions: &[Class], dataset: &Dataset) -> Result<usize> {
    if dataset.is_empty() {
        return Err(KnnError::EmptyDataset);
    }
    if predictions.len() != dataset.num_rows() {
        return Err(KnnError::InvalidParameter(format!(
            "{} predictions for {} rows",
            predictions.len(),
            dataset.num_rows()
        )));
    }

    let mut correct = 0;
    for (i, (predicted, row)) in predictions.iter().zip(dataset.iter()).enumerate() {
        let target = row
            .target()
            .ok_or_else(|| KnnError::Schema(format!("test row {} has no target", i)))?;
        if predicted == target {
            correct += 1;
        }
    }
    Ok(correct)
}

/// Execution settings for [`train_and_evaluate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalOptions {
    /// Worker threads for classification. `None` uses rayon's global pool,
    /// which is sized to the available parallelism.
    pub workers: Option<usize>,
}

impl EvalOptions {
    pub fn with_workers(workers: usize) -> Self {
        Self { workers: Some(workers) }
    }
}

/// Outcome of a timed train-and-classify run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalReport {
    pub correct: usize,
    pub total: usize,
    pub accuracy: f64,
    /// Wall-clock time spent training and classifying.
    pub elapsed: Duration,
}

/// Trains `classifier` on `training`, classifies every row of `test` in
/// parallel and scores the predictions against the test targets.
pub fn train_and_evaluate<C: Classifier + Sync + ?Sized>(
    classifier: &mut C,
    training: &Dataset,
    test: &Dataset,
    options: &EvalOptions,
) -> Result<EvalReport> {
    let pool = match options.workers {
        None => None,
        Some(0) => {
            return Err(KnnError::InvalidParameter("worker count must be at least 1".to_string()));
        }
        Some(workers) => Some(
            rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()
                .map_err(|e| KnnError::InvalidParameter(format!("failed to build worker pool: {}", e)))?,
        ),
    };

    let start = Instant::now();
    classifier.train(training)?;

    let shared: &C = classifier;
    let predictions = match &pool {
        Some(pool) => pool.install(|| par_classify_all(shared, test))?,
        None => par_classify_all(shared, test)?,
    };
    let elapsed = start.elapsed();

    let correct = count_correct(&predictions, test)?;
    let report = EvalReport {
        correct,
        total: test.num_rows(),
        accuracy: correct as f64 / test.num_rows() as f64,
        elapsed,
    };
    log::info!(
        "{}: {}/{} correct (accuracy {:.4}) in {:.3}s",
        classifier.name(),
        report.correct,
        report.total,
        report.accuracy,
        report.elapsed.as_secs_f64()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common_types::Row;
    use crate::knn::KnnClassifier;

    fn training() -> Dataset {
        Dataset::from_rows(vec![
            Row::new(vec![0.0, 0.0], Class::from("A")),
            Row::new(vec![0.0, 1.0], Class::from("A")),
            Row::new(vec![5.0, 5.0], Class::from("B")),
            Row::new(vec![5.0, 6.0], Class::from("B")),
        ])
        .unwrap()
    }

    fn test_set() -> Dataset {
        Dataset::from_rows(vec![
            Row::new(vec![0.1, 0.1], Class::from("A")),
            Row::new(vec![5.1, 5.1], Class::from("B")),
            Row::new(vec![4.0, 4.0], Class::from("A")), // misclassified
            Row::new(vec![0.5, 0.9], Class::from("A")),
        ])
        .unwrap()
    }

    #[test]
    fn test_accuracy_counts_matches() {
        let predictions = vec![Class::from("A"), Class::from("B"), Class::from("B"), Class::from("A")];
        assert_eq!(accuracy(&predictions, &test_set()).unwrap(), 0.75);
    }

    #[test]
    fn test_accuracy_rejects_empty_and_mismatched_inputs() {
        let empty = Dataset::from_rows(Vec::new()).unwrap();
        assert!(matches!(accuracy(&[], &empty), Err(KnnError::EmptyDataset)));
        assert!(matches!(accuracy(&[Class::from("A")], &test_set()), Err(KnnError::InvalidParameter(_))));
    }

    #[test]
    fn test_accuracy_requires_targets() {
        let unlabeled = Dataset::from_rows(vec![Row::unlabeled(vec![0.0])]).unwrap();
        assert!(matches!(accuracy(&[Class::from("A")], &unlabeled), Err(KnnError::Schema(_))));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut classifier = KnnClassifier::new(1).unwrap();
        classifier.train(&training()).unwrap();
        assert_eq!(
            par_classify_all(&classifier, &test_set()).unwrap(),
            classify_all(&classifier, &test_set()).unwrap()
        );
    }

    #[test]
    fn test_parallel_propagates_dimension_error() {
        let mut classifier = KnnClassifier::new(1).unwrap();
        classifier.train(&training()).unwrap();
        let wide = Dataset::from_rows(vec![Row::unlabeled(vec![0.0; 3]), Row::unlabeled(vec![1.0; 3])]).unwrap();
        assert!(matches!(
            par_classify_all(&classifier, &wide),
            Err(KnnError::Dimension { expected: 2, found: 3 })
        ));
    }

    #[test]
    fn test_train_and_evaluate_report() {
        let mut classifier = KnnClassifier::new(1).unwrap();
        let report = train_and_evaluate(&mut classifier, &training(), &test_set(), &EvalOptions::default()).unwrap();
        assert_eq!(report.correct, 3);
        assert_eq!(report.total, 4);
        assert_eq!(report.accuracy, 0.75);
        assert!(report.elapsed < Duration::from_secs(5), "took {:?}", report.elapsed);
        assert!(classifier.is_trained());
    }

    #[test]
    fn test_train_and_evaluate_with_dedicated_pool() {
        let mut classifier = KnnClassifier::new(1).unwrap();
        let report =
            train_and_evaluate(&mut classifier, &training(), &test_set(), &EvalOptions::with_workers(2)).unwrap();
        assert_eq!(report.correct, 3);
    }

    #[test]
    fn test_train_and_evaluate_rejects_zero_workers() {
        let mut classifier = KnnClassifier::new(1).unwrap();
        let result = train_and_evaluate(&mut classifier, &training(), &test_set(), &EvalOptions::with_workers(0));
        assert!(matches!(result, Err(KnnError::InvalidParameter(_))));
        assert!(!classifier.is_trained());
    }

    #[test]
    fn test_train_and_evaluate_propagates_training_errors() {
        let mut classifier = KnnClassifier::new(1).unwrap();
        classifier.train(&training()).unwrap();
        let result = train_and_evaluate(&mut classifier, &training(), &test_set(), &EvalOptions::default());
        assert!(matches!(result, Err(KnnError::AlreadyTrained)));
    }
}
