//! FFT-domain noise gate
//!
//! Transforms the signal, zeroes every bin whose normalized magnitude
//! |X[k]|/N falls below a threshold, and transforms back. Broadband noise
//! spreads thinly over all bins while tones concentrate in a few, so a
//! threshold between the two levels strips the noise.

use crate::error::FilterError;
use crate::spectrum::FftEngine;
use tracing::{trace, warn};

/// Spectral noise gate
pub struct SpectralGate {
    /// Minimum normalized magnitude a bin needs to survive
    threshold: f64,

    /// FFT plan for the last signal length
    fft_engine: Option<FftEngine>,
}

impl SpectralGate {
    /// Create a new gate
    ///
    /// # Arguments
    /// * `threshold` - Normalized magnitude |X[k]|/N below which bins are removed
    pub fn new(threshold: f64) -> Result<Self, FilterError> {
        Self::check_threshold(threshold)?;
        Ok(Self {
            threshold,
            fft_engine: None,
        })
    }

    fn check_threshold(threshold: f64) -> Result<(), FilterError> {
        if threshold.is_finite() && threshold >= 0.0 {
            Ok(())
        } else {
            Err(FilterError::InvalidThreshold(threshold))
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f64) -> Result<(), FilterError> {
        Self::check_threshold(threshold)?;
        self.threshold = threshold;
        Ok(())
    }

    fn engine_for(&mut self, n: usize) -> &mut FftEngine {
        let engine = match self.fft_engine.take() {
            Some(engine) if engine.fft_size() == n => engine,
            _ => FftEngine::new(n),
        };
        self.fft_engine.insert(engine)
    }

    /// Which one-sided bins pass the gate
    pub fn mask(&mut self, signal: &[f64]) -> Result<Vec<bool>, FilterError> {
        if signal.is_empty() {
            return Ok(Vec::new());
        }
        let threshold = self.threshold;
        let magnitudes = self
            .engine_for(signal.len())
            .compute_normalized_magnitude(signal)
            .map_err(|e| FilterError::Fft(e.to_string()))?;

        Ok(magnitudes.iter().map(|&m| m >= threshold).collect())
    }

    /// Gate `signal` and return the cleaned signal (same length)
    pub fn process(&mut self, signal: &[f64]) -> Result<Vec<f64>, FilterError> {
        let n = signal.len();
        if n == 0 {
            warn!("Empty signal passed to the spectral gate");
            return Ok(Vec::new());
        }
        let threshold = self.threshold;
        let engine = self.engine_for(n);

        let mut spectrum = engine
            .spectrum(signal)
            .map_err(|e| FilterError::Fft(e.to_string()))?;

        let scale = 1.0 / n as f64;
        let mut kept = 0usize;
        for bin in spectrum.iter_mut() {
            if bin.norm() * scale < threshold {
                *bin = num_complex::Complex::new(0.0, 0.0);
            } else {
                kept += 1;
            }
        }
        trace!(kept, bins = spectrum.len(), threshold, "Spectral gate applied");

        engine
            .inverse(&spectrum)
            .map_err(|e| FilterError::Fft(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::{synthesize, SynthesisRequest};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rms_error(a: &[f64], b: &[f64]) -> f64 {
        let sum: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
        (sum / a.len() as f64).sqrt()
    }

    #[test]
    fn test_gate_removes_broadband_noise() {
        // 1024 samples at 1024 Hz: 50 Hz lands exactly on bin 50
        let clean_request = SynthesisRequest::single_tone(1024.0, 1.0, 50.0, 0.3, 0.0, 1.0);
        let noisy_request = SynthesisRequest {
            noise_scale: 0.3,
            ..clean_request.clone()
        };
        let mut rng = StdRng::seed_from_u64(17);
        let clean = synthesize(&clean_request, &mut rng).unwrap();
        let noisy = synthesize(&noisy_request, &mut rng).unwrap();

        let mut gate = SpectralGate::new(0.1).unwrap();
        let mask = gate.mask(&noisy.samples).unwrap();
        assert_eq!(mask.iter().filter(|&&keep| keep).count(), 1);
        assert!(mask[50]);

        let cleaned = gate.process(&noisy.samples).unwrap();
        assert_eq!(cleaned.len(), noisy.len());

        let before = rms_error(&noisy.samples, &clean.samples);
        let after = rms_error(&cleaned, &clean.samples);
        assert!(before > 0.25, "noise rms {}", before);
        assert!(after < 0.05, "residual rms {}", after);
    }

    #[test]
    fn test_zero_threshold_is_identity() {
        let signal: Vec<f64> = (0..33).map(|i| ((i * 13) % 7) as f64 - 3.0).collect();
        let mut gate = SpectralGate::new(0.0).unwrap();
        let out = gate.process(&signal).unwrap();
        for (a, b) in signal.iter().zip(out.iter()) {
            assert!((a - b).abs() < 1e-10);
        }
    }

    #[test]
    fn test_invalid_threshold() {
        assert_eq!(
            SpectralGate::new(-0.5).err(),
            Some(FilterError::InvalidThreshold(-0.5))
        );
        let mut gate = SpectralGate::new(0.1).unwrap();
        assert!(gate.set_threshold(f64::NAN).is_err());
        assert_eq!(gate.threshold(), 0.1);
    }

    #[test]
    fn test_empty_signal() {
        let mut gate = SpectralGate::new(0.1).unwrap();
        assert!(gate.process(&[]).unwrap().is_empty());
        assert!(gate.mask(&[]).unwrap().is_empty());
    }
}
