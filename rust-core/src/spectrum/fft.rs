//! FFT engine using realfft for real-valued signals
//!
//! Provides the one-sided forward transform used by feature extraction,
//! the matching inverse used by the spectral gate, and a two-sided
//! complex DFT for demonstrating conjugate symmetry.

use num_complex::Complex;
use realfft::{ComplexToReal, FftError, RealFftPlanner, RealToComplex};
use rustfft::FftPlanner;
use std::sync::Arc;

/// FFT engine for real-valued signals of a fixed length
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Forward real FFT
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Inverse real FFT
    c2r: Arc<dyn ComplexToReal<f64>>,

    /// Reusable time-domain buffer
    input_buffer: Vec<f64>,

    /// Reusable one-sided spectrum buffer
    output_buffer: Vec<Complex<f64>>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size (number of samples, non-zero)
    pub fn new(fft_size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);
        let c2r = planner.plan_fft_inverse(fft_size);

        Self {
            fft_size,
            r2c,
            c2r,
            input_buffer: vec![0.0; fft_size],
            output_buffer: vec![Complex::new(0.0, 0.0); fft_size / 2 + 1],
        }
    }

    /// Compute the one-sided spectrum X[k], k = 0..=fft_size/2
    ///
    /// Signals shorter than `fft_size` are zero-padded, longer ones truncated.
    pub fn spectrum(&mut self, signal: &[f64]) -> Result<Vec<Complex<f64>>, FftError> {
        let copy_len = signal.len().min(self.fft_size);
        self.input_buffer[..copy_len].copy_from_slice(&signal[..copy_len]);
        self.input_buffer[copy_len..].fill(0.0);

        self.r2c
            .process(&mut self.input_buffer, &mut self.output_buffer)?;

        Ok(self.output_buffer.clone())
    }

    /// Magnitude spectrum |X[k]|
    pub fn compute_magnitude(&mut self, signal: &[f64]) -> Result<Vec<f64>, FftError> {
        Ok(self.spectrum(signal)?.iter().map(|c| c.norm()).collect())
    }

    /// Magnitude spectrum scaled by 1/N, so a unit cosine on an exact bin reads 0.5
    pub fn compute_normalized_magnitude(&mut self, signal: &[f64]) -> Result<Vec<f64>, FftError> {
        let scale = 1.0 / self.fft_size as f64;
        Ok(self
            .compute_magnitude(signal)?
            .into_iter()
            .map(|mag| mag * scale)
            .collect())
    }

    /// Inverse of [`FftEngine::spectrum`], normalized so that
    /// `inverse(spectrum(x)) == x`
    ///
    /// The imaginary parts of the DC bin (and the Nyquist bin for even
    /// sizes) are discarded, as they must be zero for a real signal.
    pub fn inverse(&mut self, spectrum: &[Complex<f64>]) -> Result<Vec<f64>, FftError> {
        let mut buffer = vec![Complex::new(0.0, 0.0); self.num_bins()];
        let copy_len = spectrum.len().min(buffer.len());
        buffer[..copy_len].copy_from_slice(&spectrum[..copy_len]);

        buffer[0].im = 0.0;
        if self.fft_size % 2 == 0 {
            if let Some(last) = buffer.last_mut() {
                last.im = 0.0;
            }
        }

        let mut output = vec![0.0; self.fft_size];
        self.c2r.process(&mut buffer, &mut output)?;

        let scale = 1.0 / self.fft_size as f64;
        for s in output.iter_mut() {
            *s *= scale;
        }
        Ok(output)
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Get number of frequency bins (fft_size/2 + 1 for real FFT)
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    /// Centre frequency of `bin` in Hz
    pub fn bin_to_hz(&self, bin: usize, sample_rate: f64) -> f64 {
        bin as f64 * sample_rate / self.fft_size as f64
    }

    /// Frequency axis in Hz, from DC to Nyquist
    pub fn frequency_axis_hz(&self, sample_rate: f64) -> Vec<f64> {
        (0..self.num_bins())
            .map(|bin| self.bin_to_hz(bin, sample_rate))
            .collect()
    }
}

/// Full two-sided DFT of a real signal (complex FFT of length N)
pub fn two_sided_spectrum(signal: &[f64]) -> Vec<Complex<f64>> {
    let mut buffer: Vec<Complex<f64>> = signal.iter().map(|&s| Complex::new(s, 0.0)).collect();
    if buffer.is_empty() {
        return buffer;
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(buffer.len());
    fft.process(&mut buffer);
    buffer
}

/// Bin frequencies in standard DFT order: 0, 1, ..., then the negative
/// frequencies, each multiplied by `sample_rate / n`
pub fn fft_frequencies(n: usize, sample_rate: f64) -> Vec<f64> {
    let resolution = sample_rate / n as f64;
    (0..n)
        .map(|k| {
            let signed = if k <= (n - 1) / 2 {
                k as f64
            } else {
                k as f64 - n as f64
            };
            signed * resolution
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_fft_dc_signal() {
        let mut fft = FftEngine::new(1024);

        // DC signal (constant), zero-padded to 1024
        let signal = vec![1.0; 100];
        let spectrum = fft.compute_magnitude(&signal).unwrap();

        assert_eq!(spectrum.len(), 513);
        assert!((spectrum[0] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalized_cosine_on_bin() {
        let n = 64;
        let mut fft = FftEngine::new(n);

        // Exactly 4 periods in the window
        let signal: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * 4.0 * i as f64 / n as f64).cos())
            .collect();
        let mag = fft.compute_normalized_magnitude(&signal).unwrap();

        assert!((mag[4] - 0.5).abs() < 1e-12);
        for (k, &m) in mag.iter().enumerate() {
            if k != 4 {
                assert!(m < 1e-12, "bin {} leaked {}", k, m);
            }
        }
    }

    #[test]
    fn test_inverse_recovers_signal() {
        for n in [16usize, 17] {
            let mut fft = FftEngine::new(n);
            let signal: Vec<f64> = (0..n).map(|i| ((i * 7) % 5) as f64 - 2.0).collect();

            let spectrum = fft.spectrum(&signal).unwrap();
            let recovered = fft.inverse(&spectrum).unwrap();

            assert_eq!(recovered.len(), n);
            for (a, b) in signal.iter().zip(recovered.iter()) {
                assert!((a - b).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_frequency_axis() {
        let fft = FftEngine::new(16);
        let freqs = fft.frequency_axis_hz(16.0);

        assert_eq!(freqs.len(), 9);
        assert_eq!(freqs[0], 0.0);
        assert_eq!(freqs[2], 2.0);
        assert_eq!(freqs[8], 8.0);
    }

    #[test]
    fn test_two_sided_matches_one_sided_and_is_symmetric() {
        let n = 12;
        let signal: Vec<f64> = (0..n).map(|i| (0.3 * i as f64).sin() + 0.1 * i as f64).collect();

        let full = two_sided_spectrum(&signal);
        let half = FftEngine::new(n).spectrum(&signal).unwrap();

        assert_eq!(full.len(), n);
        for k in 0..half.len() {
            assert!((full[k] - half[k]).norm() < 1e-9);
        }
        // X[N-k] = conj(X[k]) for real input
        for k in 1..n {
            assert!((full[n - k] - full[k].conj()).norm() < 1e-9);
        }
    }

    #[test]
    fn test_fft_frequencies_order() {
        assert_eq!(
            fft_frequencies(8, 8.0),
            vec![0.0, 1.0, 2.0, 3.0, -4.0, -3.0, -2.0, -1.0]
        );
        assert_eq!(
            fft_frequencies(5, 5.0),
            vec![0.0, 1.0, 2.0, -2.0, -1.0]
        );
    }
}
