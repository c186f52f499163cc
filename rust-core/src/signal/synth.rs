//! Sum-of-cosines signal synthesizer with additive Gaussian noise
//!
//! x(t) = Σ a_k·cos(2π·f_k·t + φ_k) + σ·z(t),  z ~ N(0, 1)

use crate::error::SynthesisError;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Everything needed to render one synthetic signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    /// Sample rate in Hz
    pub sample_rate: f64,

    /// Cosine amplitudes a_k
    pub amplitudes: Vec<f64>,

    /// Cosine frequencies f_k in Hz
    pub frequencies: Vec<f64>,

    /// Cosine phases φ_k in radians
    pub phases: Vec<f64>,

    /// Standard deviation σ of the additive noise
    pub noise_scale: f64,

    /// Signal length in seconds
    pub duration: f64,
}

impl SynthesisRequest {
    /// Single cosine plus noise
    pub fn single_tone(
        sample_rate: f64,
        amplitude: f64,
        frequency: f64,
        phase: f64,
        noise_scale: f64,
        duration: f64,
    ) -> Self {
        Self {
            sample_rate,
            amplitudes: vec![amplitude],
            frequencies: vec![frequency],
            phases: vec![phase],
            noise_scale,
            duration,
        }
    }

    /// Number of samples the request renders: ⌊duration · sample_rate⌋
    pub fn num_samples(&self) -> usize {
        (self.duration * self.sample_rate) as usize
    }

    fn validate(&self) -> Result<(), SynthesisError> {
        let (a, f, p) = (
            self.amplitudes.len(),
            self.frequencies.len(),
            self.phases.len(),
        );
        if a != f || f != p {
            return Err(SynthesisError::ShapeMismatch {
                amplitudes: a,
                frequencies: f,
                phases: p,
            });
        }
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(SynthesisError::InvalidSampleRate(self.sample_rate));
        }
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(SynthesisError::InvalidDuration(self.duration));
        }
        if !(self.noise_scale.is_finite() && self.noise_scale >= 0.0) {
            return Err(SynthesisError::InvalidNoiseScale(self.noise_scale));
        }
        Ok(())
    }
}

/// A sampled signal and its time grid
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    /// Sample times in seconds, t[i] = i / sample_rate
    pub time: Vec<f64>,
    /// Sample values
    pub samples: Vec<f64>,
    /// Sample rate in Hz
    pub sample_rate: f64,
}

impl Signal {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Render the noiseless part of a request
fn render(request: &SynthesisRequest) -> Signal {
    let n = request.num_samples();
    let time: Vec<f64> = (0..n).map(|i| i as f64 / request.sample_rate).collect();

    let samples = time
        .iter()
        .map(|&t| {
            request
                .amplitudes
                .iter()
                .zip(&request.frequencies)
                .zip(&request.phases)
                .map(|((&a, &f), &phi)| a * (2.0 * PI * f * t + phi).cos())
                .sum()
        })
        .collect();

    Signal {
        time,
        samples,
        sample_rate: request.sample_rate,
    }
}

/// Synthesize a noisy sum of cosines
///
/// One standard-normal draw is taken from `rng` per sample even when
/// `noise_scale` is zero, so the generator advances identically for every
/// request of the same length.
pub fn synthesize<R: Rng + ?Sized>(
    request: &SynthesisRequest,
    rng: &mut R,
) -> Result<Signal, SynthesisError> {
    request.validate()?;

    let mut signal = render(request);
    for s in signal.samples.iter_mut() {
        let z: f64 = rng.sample(StandardNormal);
        if request.noise_scale > 0.0 {
            *s += request.noise_scale * z;
        }
    }

    Ok(signal)
}

/// A single noiseless cosine
pub fn tone(
    frequency: f64,
    amplitude: f64,
    phase: f64,
    duration: f64,
    sample_rate: f64,
) -> Result<Signal, SynthesisError> {
    let request = SynthesisRequest::single_tone(sample_rate, amplitude, frequency, phase, 0.0, duration);
    request.validate()?;
    Ok(render(&request))
}
