//! PyO3 bindings for the notebooks

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::error::{FilterError, LabError};

mod filter_bindings;
mod spectrum_bindings;
mod feature_bindings;
mod classifier_bindings;

impl From<LabError> for PyErr {
    fn from(err: LabError) -> Self {
        match err {
            LabError::Filter(FilterError::Fft(msg)) => PyRuntimeError::new_err(msg),
            other => PyValueError::new_err(other.to_string()),
        }
    }
}

/// Borrow a numpy array as a contiguous slice
fn contiguous<'a>(array: &'a numpy::PyReadonlyArray1<'_, f64>) -> PyResult<&'a [f64]> {
    array
        .as_slice()
        .map_err(|_| PyValueError::new_err("Array must be contiguous"))
}

/// Python module definition
#[pymodule]
fn fourier_lab(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<filter_bindings::PyWindowType>()?;
    m.add_class::<filter_bindings::PySpectralGate>()?;
    m.add_class::<spectrum_bindings::PySpectrumAnalyzer>()?;
    m.add_class::<classifier_bindings::PyKNearestNeighbors>()?;
    m.add_class::<classifier_bindings::PyMlp>()?;

    m.add_function(wrap_pyfunction!(filter_bindings::window, m)?)?;
    m.add_function(wrap_pyfunction!(feature_bindings::synthesize, m)?)?;
    m.add_function(wrap_pyfunction!(feature_bindings::extract_features, m)?)?;
    m.add_function(wrap_pyfunction!(feature_bindings::band_partition, m)?)?;
    m.add_function(wrap_pyfunction!(feature_bindings::build_dataset, m)?)?;

    Ok(())
}
