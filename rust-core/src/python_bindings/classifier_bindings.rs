//! Python bindings for the classifiers (integer labels)

use pyo3::prelude::*;
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray2};
use crate::classify::{Classifier, KNearestNeighbors, Mlp, MlpOptions};
use crate::error::LabError;

/// k-nearest-neighbour classifier exposed to Python
#[pyclass(name = "KNearestNeighbors")]
pub struct PyKNearestNeighbors {
    inner: KNearestNeighbors<i64>,
}

#[pymethods]
impl PyKNearestNeighbors {
    #[new]
    #[pyo3(signature = (k=3))]
    fn new(k: usize) -> PyResult<Self> {
        let inner = KNearestNeighbors::new(k).map_err(LabError::from)?;
        Ok(Self { inner })
    }

    fn fit(&mut self, features: PyReadonlyArray2<f64>, labels: Vec<i64>) -> PyResult<()> {
        Ok(self.inner.fit(features.as_array(), &labels).map_err(LabError::from)?)
    }

    fn predict<'py>(
        &self,
        py: Python<'py>,
        features: PyReadonlyArray2<f64>,
    ) -> PyResult<&'py PyArray1<i64>> {
        let labels = self.inner.predict(features.as_array()).map_err(LabError::from)?;
        Ok(PyArray1::from_vec(py, labels))
    }
}

/// One-hidden-layer perceptron exposed to Python
#[pyclass(name = "Mlp")]
pub struct PyMlp {
    inner: Mlp<i64>,
}

#[pymethods]
impl PyMlp {
    #[new]
    #[pyo3(signature = (hidden_size=16, epochs=200, batch_size=16, learning_rate=0.05, l2_penalty=1e-4, seed=42))]
    fn new(
        hidden_size: usize,
        epochs: usize,
        batch_size: usize,
        learning_rate: f64,
        l2_penalty: f64,
        seed: u64,
    ) -> Self {
        Self {
            inner: Mlp::new(MlpOptions {
                hidden_size,
                epochs,
                batch_size,
                learning_rate,
                l2_penalty,
                seed,
            }),
        }
    }

    fn fit(&mut self, features: PyReadonlyArray2<f64>, labels: Vec<i64>) -> PyResult<()> {
        Ok(self.inner.fit(features.as_array(), &labels).map_err(LabError::from)?)
    }

    fn predict<'py>(
        &self,
        py: Python<'py>,
        features: PyReadonlyArray2<f64>,
    ) -> PyResult<&'py PyArray1<i64>> {
        let labels = self.inner.predict(features.as_array()).map_err(LabError::from)?;
        Ok(PyArray1::from_vec(py, labels))
    }

    /// Class probabilities, columns ordered as `classes()`
    fn predict_proba<'py>(
        &self,
        py: Python<'py>,
        features: PyReadonlyArray2<f64>,
    ) -> PyResult<&'py PyArray2<f64>> {
        let probs = self.inner.predict_proba(features.as_array()).map_err(LabError::from)?;
        Ok(probs.into_pyarray(py))
    }

    fn classes(&self) -> Vec<i64> {
        self.inner.classes().to_vec()
    }
}
