//! Python bindings for synthesis, feature extraction and datasets

use pyo3::prelude::*;
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray1};
use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::config::{DatasetConfig, ParamRange};
use crate::error::LabError;
use crate::{dataset, features, signal};
use super::contiguous;

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Noisy sum of cosines
///
/// Returns:
///     (time, signal) as numpy arrays
#[pyfunction]
#[pyo3(signature = (sample_rate, amplitudes, frequencies, phases, noise_scale=0.0, duration=1.0, seed=None))]
#[allow(clippy::too_many_arguments)]
pub fn synthesize<'py>(
    py: Python<'py>,
    sample_rate: f64,
    amplitudes: Vec<f64>,
    frequencies: Vec<f64>,
    phases: Vec<f64>,
    noise_scale: f64,
    duration: f64,
    seed: Option<u64>,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let request = signal::SynthesisRequest {
        sample_rate,
        amplitudes,
        frequencies,
        phases,
        noise_scale,
        duration,
    };
    let signal = signal::synthesize(&request, &mut make_rng(seed)).map_err(LabError::from)?;

    Ok((
        PyArray1::from_vec(py, signal.time),
        PyArray1::from_vec(py, signal.samples),
    ))
}

/// RMS band energies of the one-sided magnitude spectrum
#[pyfunction]
pub fn extract_features<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    num_bands: usize,
) -> PyResult<&'py PyArray1<f64>> {
    let features = features::extract_features(contiguous(&signal)?, num_bands).map_err(LabError::from)?;
    Ok(PyArray1::from_vec(py, features))
}

/// Band boundaries as (start, end) bin pairs, end exclusive
#[pyfunction]
pub fn band_partition(num_bins: usize, num_bands: usize) -> PyResult<Vec<(usize, usize)>> {
    let bands = features::band_partition(num_bins, num_bands).map_err(LabError::from)?;
    Ok(bands.into_iter().map(|band| (band.start, band.end)).collect())
}

/// High/low tone dataset
///
/// Returns:
///     (features [samples x bands], labels (0 = low, 1 = high), frequencies)
#[pyfunction]
#[pyo3(signature = (num_samples, duration=0.05, num_bands=16, threshold_hz=8000.0, sample_rate=44100.0, min_frequency=20.0, max_frequency=16000.0, seed=None))]
#[allow(clippy::too_many_arguments)]
pub fn build_dataset<'py>(
    py: Python<'py>,
    num_samples: usize,
    duration: f64,
    num_bands: usize,
    threshold_hz: f64,
    sample_rate: f64,
    min_frequency: f64,
    max_frequency: f64,
    seed: Option<u64>,
) -> PyResult<(&'py PyArray2<f64>, &'py PyArray1<i64>, &'py PyArray1<f64>)> {
    let config = DatasetConfig {
        num_samples,
        duration,
        num_bands,
        threshold_hz,
        sample_rate,
        frequency: ParamRange::new(min_frequency, max_frequency),
        ..Default::default()
    };
    let data = dataset::build_dataset(&config, &mut make_rng(seed)).map_err(LabError::from)?;
    let labels: Vec<i64> = data.labels.iter().map(|l| l.index() as i64).collect();

    Ok((
        data.features.into_pyarray(py),
        PyArray1::from_vec(py, labels),
        PyArray1::from_vec(py, data.frequencies),
    ))
}
