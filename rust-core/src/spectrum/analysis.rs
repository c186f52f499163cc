//! High-level spectrum analyzer
//!
//! Combines the FFT engine with windowing for the leakage and windowing demos

use super::fft::FftEngine;
use super::windowing::{apply_window, window_correction_factor};
use crate::filters::windows::WindowType;
use realfft::FftError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Spectrum analyzer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Window type for spectral analysis
    pub window_type: WindowType,

    /// Sample rate in Hz
    pub sample_rate: f64,

    /// Apply amplitude correction for windowing
    pub apply_correction: bool,

    /// Double the non-DC, non-Nyquist bins so a cosine of amplitude A reads A
    pub one_sided_amplitude: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            window_type: WindowType::Hann,
            sample_rate: 44100.0,
            apply_correction: true,
            one_sided_amplitude: true,
        }
    }
}

/// Magnitude spectrum with its frequency axis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spectrum {
    /// Bin centre frequencies in Hz
    pub frequencies: Vec<f64>,
    /// Normalized magnitudes
    pub magnitudes: Vec<f64>,
}

impl Spectrum {
    /// Index of the largest magnitude
    pub fn dominant_bin(&self) -> Option<usize> {
        self.magnitudes
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(idx, _)| idx)
    }

    /// Frequency of the largest magnitude in Hz
    pub fn dominant_frequency(&self) -> Option<f64> {
        self.dominant_bin().map(|idx| self.frequencies[idx])
    }

    /// Fraction of spectral energy outside the dominant bin and its two
    /// neighbours; 0 for a tone that falls exactly on a bin
    pub fn leakage_ratio(&self) -> f64 {
        let Some(peak) = self.dominant_bin() else {
            return 0.0;
        };
        let total: f64 = self.magnitudes.iter().map(|m| m * m).sum();
        if total <= 0.0 {
            return 0.0;
        }

        let lo = peak.saturating_sub(1);
        let hi = (peak + 1).min(self.magnitudes.len() - 1);
        let main: f64 = self.magnitudes[lo..=hi].iter().map(|m| m * m).sum();

        ((total - main) / total).max(0.0)
    }
}

/// Spectrum analyzer for arbitrary-length signals
pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
    fft_engine: Option<FftEngine>,
}

impl SpectrumAnalyzer {
    /// Create new spectrum analyzer
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            fft_engine: None,
        }
    }

    /// Analyze signal and return its windowed magnitude spectrum
    ///
    /// The FFT size equals the signal length; the plan is reused while the
    /// length stays the same.
    pub fn analyze(&mut self, signal: &[f64]) -> Result<Spectrum, FftError> {
        let n = signal.len();
        if n == 0 {
            warn!("Empty signal passed to the spectrum analyzer");
            return Ok(Spectrum::default());
        }

        let engine = match self.fft_engine.take() {
            Some(engine) if engine.fft_size() == n => engine,
            _ => FftEngine::new(n),
        };
        let engine = self.fft_engine.insert(engine);

        let windowed = apply_window(signal, self.config.window_type);
        let mut magnitudes = engine.compute_normalized_magnitude(&windowed)?;

        if self.config.apply_correction {
            let factor = window_correction_factor(self.config.window_type, n);
            for m in magnitudes.iter_mut() {
                *m *= factor;
            }
        }

        if self.config.one_sided_amplitude {
            // DC and (for even n) Nyquist have no mirrored partner
            let last = magnitudes.len() - 1;
            let upper = if n % 2 == 0 { last } else { last + 1 };
            for m in magnitudes[1..upper].iter_mut() {
                *m *= 2.0;
            }
        }

        Ok(Spectrum {
            frequencies: engine.frequency_axis_hz(self.config.sample_rate),
            magnitudes,
        })
    }

    /// Analyze and return magnitude in dB
    ///
    /// # Arguments
    /// * `signal` - Input signal
    /// * `reference` - Reference level for dB
    pub fn analyze_db(&mut self, signal: &[f64], reference: f64) -> Result<Spectrum, FftError> {
        let mut spectrum = self.analyze(signal)?;
        for m in spectrum.magnitudes.iter_mut() {
            let mag_clamped = m.max(1e-10);
            *m = 20.0 * (mag_clamped / reference).log10();
        }
        Ok(spectrum)
    }

    /// Update configuration
    pub fn update_config(&mut self, config: AnalyzerConfig) {
        self.config = config;
    }

    /// Get current configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
}
