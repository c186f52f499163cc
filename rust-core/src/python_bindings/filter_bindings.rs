//! Python bindings for windows and the spectral gate

use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};
use crate::error::LabError;
use crate::filters::{generate_window, SpectralGate, WindowType};
use super::contiguous;

/// Window type enum exposed to Python
#[pyclass(name = "WindowType")]
#[derive(Clone)]
pub enum PyWindowType {
    Hann,
    Hamming,
    Blackman,
    Rectangular,
}

impl From<PyWindowType> for WindowType {
    fn from(py_win: PyWindowType) -> Self {
        match py_win {
            PyWindowType::Hann => WindowType::Hann,
            PyWindowType::Hamming => WindowType::Hamming,
            PyWindowType::Blackman => WindowType::Blackman,
            PyWindowType::Rectangular => WindowType::Rectangular,
        }
    }
}

#[pymethods]
impl PyWindowType {
    /// Main lobe width in DFT bins
    fn mainlobe_width_bins(&self) -> f64 {
        WindowType::from(self.clone()).mainlobe_width_bins()
    }

    /// Highest side lobe in dB relative to the main lobe
    fn sidelobe_level_db(&self) -> f64 {
        WindowType::from(self.clone()).sidelobe_level_db()
    }
}

/// Window coefficients
///
/// Args:
///     window_type: Window type
///     length: Number of samples
#[pyfunction]
pub fn window<'py>(py: Python<'py>, window_type: PyWindowType, length: usize) -> &'py PyArray1<f64> {
    PyArray1::from_vec(py, generate_window(window_type.into(), length))
}

/// FFT-domain noise gate exposed to Python
#[pyclass(name = "SpectralGate")]
pub struct PySpectralGate {
    gate: SpectralGate,
}

#[pymethods]
impl PySpectralGate {
    /// Create a gate
    ///
    /// Args:
    ///     threshold: Normalized magnitude |X[k]|/N below which bins are removed
    #[new]
    fn new(threshold: f64) -> PyResult<Self> {
        let gate = SpectralGate::new(threshold).map_err(LabError::from)?;
        Ok(Self { gate })
    }

    /// Gate a signal
    ///
    /// Returns:
    ///     Cleaned signal as numpy array
    fn process<'py>(
        &mut self,
        py: Python<'py>,
        signal: PyReadonlyArray1<f64>,
    ) -> PyResult<&'py PyArray1<f64>> {
        let output = self.gate.process(contiguous(&signal)?).map_err(LabError::from)?;
        Ok(PyArray1::from_vec(py, output))
    }

    /// Boolean mask of the bins that survive the gate
    fn mask(&mut self, signal: PyReadonlyArray1<f64>) -> PyResult<Vec<bool>> {
        Ok(self.gate.mask(contiguous(&signal)?).map_err(LabError::from)?)
    }

    #[getter]
    fn threshold(&self) -> f64 {
        self.gate.threshold()
    }

    #[setter]
    fn set_threshold(&mut self, threshold: f64) -> PyResult<()> {
        Ok(self.gate.set_threshold(threshold).map_err(LabError::from)?)
    }
}
