//! Python bindings for spectrum analysis

use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};
use crate::spectrum::{AnalyzerConfig, Spectrum, SpectrumAnalyzer};
use super::contiguous;
use super::filter_bindings::PyWindowType;

/// Spectrum analyzer exposed to Python
#[pyclass(name = "SpectrumAnalyzer")]
pub struct PySpectrumAnalyzer {
    analyzer: SpectrumAnalyzer,
}

impl PySpectrumAnalyzer {
    fn run(&mut self, signal: &PyReadonlyArray1<f64>) -> PyResult<Spectrum> {
        self.analyzer
            .analyze(contiguous(signal)?)
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }
}

#[pymethods]
impl PySpectrumAnalyzer {
    /// Create a new spectrum analyzer
    ///
    /// Args:
    ///     window_type: Window applied before the FFT
    ///     sample_rate: Sample rate in Hz
    ///     apply_correction: Whether to undo the window's amplitude loss
    ///     one_sided_amplitude: Whether a cosine of amplitude A should read A
    #[new]
    #[pyo3(signature = (window_type=PyWindowType::Hann, sample_rate=44100.0, apply_correction=true, one_sided_amplitude=true))]
    fn new(
        window_type: PyWindowType,
        sample_rate: f64,
        apply_correction: bool,
        one_sided_amplitude: bool,
    ) -> Self {
        let config = AnalyzerConfig {
            window_type: window_type.into(),
            sample_rate,
            apply_correction,
            one_sided_amplitude,
        };

        Self {
            analyzer: SpectrumAnalyzer::new(config),
        }
    }

    /// Analyze signal
    ///
    /// Returns:
    ///     (frequencies in Hz, magnitudes) as numpy arrays
    fn analyze<'py>(
        &mut self,
        py: Python<'py>,
        signal: PyReadonlyArray1<f64>,
    ) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
        let spectrum = self.run(&signal)?;
        Ok((
            PyArray1::from_vec(py, spectrum.frequencies),
            PyArray1::from_vec(py, spectrum.magnitudes),
        ))
    }

    /// Analyze and return magnitude in dB
    ///
    /// Args:
    ///     signal: Input signal
    ///     reference: Reference level for 0 dB
    ///
    /// Returns:
    ///     (frequencies in Hz, magnitudes in dB) as numpy arrays
    #[pyo3(signature = (signal, reference=1.0))]
    fn analyze_db<'py>(
        &mut self,
        py: Python<'py>,
        signal: PyReadonlyArray1<f64>,
        reference: f64,
    ) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
        let spectrum = self
            .analyzer
            .analyze_db(contiguous(&signal)?, reference)
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        Ok((
            PyArray1::from_vec(py, spectrum.frequencies),
            PyArray1::from_vec(py, spectrum.magnitudes),
        ))
    }

    /// Frequency of the strongest bin, or None for an empty signal
    fn dominant_frequency(&mut self, signal: PyReadonlyArray1<f64>) -> PyResult<Option<f64>> {
        Ok(self.run(&signal)?.dominant_frequency())
    }

    /// Fraction of energy outside the strongest bin and its neighbours
    fn leakage_ratio(&mut self, signal: PyReadonlyArray1<f64>) -> PyResult<f64> {
        Ok(self.run(&signal)?.leakage_ratio())
    }

    /// Get current sample rate
    fn get_sample_rate(&self) -> f64 {
        self.analyzer.config().sample_rate
    }

    /// Change the window type
    fn set_window(&mut self, window_type: PyWindowType) {
        let mut config = self.analyzer.config().clone();
        config.window_type = window_type.into();
        self.analyzer.update_config(config);
    }
}
