//! Band-energy feature extraction
//!
//! Signal → |FFT|/N (one-sided) → N contiguous bands → RMS per band

use super::bands::band_partition;
use crate::error::FeatureError;
use crate::spectrum::FftEngine;
use std::ops::Range;
use tracing::warn;

/// Reusable band-energy extractor
///
/// Keeps the FFT plan of the last signal length, so extracting features
/// from many equally long signals plans the transform only once.
pub struct FeatureExtractor {
    num_bands: usize,
    fft_engine: Option<FftEngine>,
}

impl FeatureExtractor {
    pub fn new(num_bands: usize) -> Self {
        Self {
            num_bands,
            fft_engine: None,
        }
    }

    pub fn num_bands(&self) -> usize {
        self.num_bands
    }

    /// Normalized one-sided magnitude spectrum |X[k]| / N
    pub fn magnitude_spectrum(&mut self, signal: &[f64]) -> Result<Vec<f64>, FeatureError> {
        let n = signal.len();
        if n == 0 {
            warn!("Feature extraction called on an empty signal");
            return Err(FeatureError::EmptySignal);
        }

        let engine = match self.fft_engine.take() {
            Some(engine) if engine.fft_size() == n => engine,
            _ => FftEngine::new(n),
        };
        let engine = self.fft_engine.insert(engine);

        engine
            .compute_normalized_magnitude(signal)
            .map_err(|e| FeatureError::Fft(e.to_string()))
    }

    /// RMS magnitude of every band
    ///
    /// # Returns
    /// `num_bands` values, lowest frequencies first
    pub fn extract(&mut self, signal: &[f64]) -> Result<Vec<f64>, FeatureError> {
        let magnitudes = self.magnitude_spectrum(signal)?;
        let bands = band_partition(magnitudes.len(), self.num_bands)?;
        Ok(band_rms(&magnitudes, &bands))
    }
}

/// Root-mean-square of `magnitudes` over each band
pub fn band_rms(magnitudes: &[f64], bands: &[Range<usize>]) -> Vec<f64> {
    bands
        .iter()
        .map(|band| {
            let slice = &magnitudes[band.clone()];
            let mean_sq = slice.iter().map(|m| m * m).sum::<f64>() / slice.len() as f64;
            mean_sq.sqrt()
        })
        .collect()
}

/// One-shot band-energy features of `signal`
pub fn extract_features(signal: &[f64], num_bands: usize) -> Result<Vec<f64>, FeatureError> {
    FeatureExtractor::new(num_bands).extract(signal)
}
