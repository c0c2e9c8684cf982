//! Python bindings, built with the `python` feature.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::common_types::{Class, Row};
use crate::dataset::Dataset;
use crate::error::KnnError;
use crate::knn::{KnnClassifier, KnnDistance};

fn to_py_err(err: KnnError) -> PyErr {
    match err {
        KnnError::NotTrained | KnnError::AlreadyTrained => PyRuntimeError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

#[pyclass(name = "KnnClassifier")]
struct PyKnnClassifier {
    classifier: KnnClassifier,
}

#[pymethods]
impl PyKnnClassifier {
    #[new]
    #[pyo3(signature = (k, distance_metric = "euclidean"))]
    fn new(k: usize, distance_metric: &str) -> PyResult<Self> {
        let distance: KnnDistance = distance_metric.parse().map_err(to_py_err)?;
        let classifier = KnnClassifier::new(k).map_err(to_py_err)?.with_distance(distance);
        Ok(PyKnnClassifier { classifier })
    }

    /// Trains on parallel lists of feature vectors and string labels.
    fn fit(&mut self, features: Vec<Vec<f64>>, labels: Vec<String>) -> PyResult<()> {
        if features.len() != labels.len() {
            return Err(PyValueError::new_err(format!(
                "got {} feature vectors but {} labels",
                features.len(),
                labels.len()
            )));
        }
        let rows = features
            .into_iter()
            .zip(labels)
            .map(|(features, label)| Row::new(features, Class::Text(label)))
            .collect();
        let dataset = Dataset::from_rows(rows).map_err(to_py_err)?;
        self.classifier.train(&dataset).map_err(to_py_err)
    }

    fn predict_single(&self, features: Vec<f64>) -> PyResult<String> {
        let class = self.classifier.classify_features(&features).map_err(to_py_err)?;
        Ok(class.to_string())
    }

    fn predict(&self, py: Python<'_>, test_data: Vec<Vec<f64>>) -> PyResult<Vec<String>> {
        let classifier = &self.classifier;
        py.allow_threads(|| {
            test_data
                .iter()
                .map(|features| classifier.classify_features(features).map(|class| class.to_string()))
                .collect::<Result<Vec<_>, _>>()
        })
        .map_err(to_py_err)
    }

    #[getter]
    fn k(&self) -> usize {
        self.classifier.k()
    }

    #[getter]
    fn is_trained(&self) -> bool {
        self.classifier.is_trained()
    }
}

#[pymodule]
fn knn_classifier(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyKnnClassifier>()?;
    Ok(())
}
