//! Parameter definitions for the interactive demos
//!
//! Each tunable value is described by name, kind, valid range and default,
//! so an outer widget layer can build sliders from these structs and hand
//! the chosen values back for validation.

use crate::error::ConfigError;
use crate::signal::SynthesisRequest;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Closed interval [min, max]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Both ends finite, `min <= max`, and a finite width for uniform sampling
    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.min.is_finite()
            && self.max.is_finite()
            && self.min <= self.max
            && (self.max - self.min).is_finite()
        {
            Ok(())
        } else {
            Err(ConfigError::InvalidRange {
                name: name.to_string(),
                min: self.min,
                max: self.max,
            })
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Uniform draw from [min, max); a degenerate range always yields `min`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.max > self.min {
            rng.gen_range(self.min..self.max)
        } else {
            self.min
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKind {
    Float,
    Integer,
}

/// One user-facing parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    pub range: ParamRange,
    pub default: f64,
    /// Slider increment
    pub step: f64,
}

impl ParamSpec {
    pub fn float(name: &str, min: f64, max: f64, default: f64, step: f64) -> Self {
        Self {
            name: name.to_string(),
            kind: ParamKind::Float,
            range: ParamRange::new(min, max),
            default,
            step,
        }
    }

    pub fn integer(name: &str, min: f64, max: f64, default: f64) -> Self {
        Self {
            name: name.to_string(),
            kind: ParamKind::Integer,
            range: ParamRange::new(min, max),
            default,
            step: 1.0,
        }
    }

    /// Validate a user value, rounding integer parameters
    pub fn check(&self, value: f64) -> Result<f64, ConfigError> {
        let value = match self.kind {
            ParamKind::Float => value,
            ParamKind::Integer => value.round(),
        };
        if self.range.contains(value) {
            Ok(value)
        } else {
            Err(ConfigError::OutOfRange {
                name: self.name.clone(),
                value,
                min: self.range.min,
                max: self.range.max,
            })
        }
    }
}

/// Values chosen for a single-tone demo
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneValues {
    pub sample_rate: f64,
    pub duration: f64,
    pub amplitude: f64,
    pub frequency: f64,
    pub phase: f64,
    pub noise: f64,
}

/// Slider definitions for the single-tone demos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneControls {
    pub sample_rate: ParamSpec,
    pub duration: ParamSpec,
    pub amplitude: ParamSpec,
    pub frequency: ParamSpec,
    pub phase: ParamSpec,
    pub noise: ParamSpec,
}

impl Default for ToneControls {
    fn default() -> Self {
        Self {
            sample_rate: ParamSpec::integer("sample_rate", 1000.0, 48000.0, 44100.0),
            duration: ParamSpec::float("duration", 0.01, 2.0, 1.0, 0.01),
            amplitude: ParamSpec::float("amplitude", 0.0, 2.0, 1.0, 0.05),
            frequency: ParamSpec::float("frequency", 1.0, 20000.0, 440.0, 1.0),
            phase: ParamSpec::float("phase", -PI, PI, 0.0, 0.01),
            noise: ParamSpec::float("noise", 0.0, 1.0, 0.0, 0.01),
        }
    }
}

impl ToneControls {
    /// All parameters in display order
    pub fn params(&self) -> [&ParamSpec; 6] {
        [
            &self.sample_rate,
            &self.duration,
            &self.amplitude,
            &self.frequency,
            &self.phase,
            &self.noise,
        ]
    }

    pub fn defaults(&self) -> ToneValues {
        ToneValues {
            sample_rate: self.sample_rate.default,
            duration: self.duration.default,
            amplitude: self.amplitude.default,
            frequency: self.frequency.default,
            phase: self.phase.default,
            noise: self.noise.default,
        }
    }

    /// Validate slider values and turn them into a synthesis request
    pub fn request(&self, values: &ToneValues) -> Result<SynthesisRequest, ConfigError> {
        Ok(SynthesisRequest::single_tone(
            self.sample_rate.check(values.sample_rate)?,
            self.amplitude.check(values.amplitude)?,
            self.frequency.check(values.frequency)?,
            self.phase.check(values.phase)?,
            self.noise.check(values.noise)?,
            self.duration.check(values.duration)?,
        ))
    }
}

/// Parameters of the high/low tone dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Number of labeled examples
    pub num_samples: usize,

    /// Length of each synthesized signal in seconds
    pub duration: f64,

    /// Feature vector length
    pub num_bands: usize,

    /// Frequencies strictly above this are labeled high
    pub threshold_hz: f64,

    /// Sample rate in Hz
    pub sample_rate: f64,

    pub amplitude: ParamRange,
    pub phase: ParamRange,
    /// Noise scale range, used only when the noise coin lands on 1
    pub noise_scale: ParamRange,
    pub frequency: ParamRange,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            num_samples: 200,
            duration: 0.05,
            num_bands: 16,
            threshold_hz: 8000.0,
            sample_rate: 44100.0,
            amplitude: ParamRange::new(0.1, 1.0),
            phase: ParamRange::new(0.0, 2.0 * PI),
            noise_scale: ParamRange::new(0.0, 0.5),
            frequency: ParamRange::new(20.0, 16000.0),
        }
    }
}

impl DatasetConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_samples == 0 {
            return Err(ConfigError::NoSamples);
        }
        self.amplitude.validate("amplitude")?;
        self.phase.validate("phase")?;
        self.noise_scale.validate("noise_scale")?;
        self.frequency.validate("frequency")?;

        let nyquist_hz = self.sample_rate / 2.0;
        if self.frequency.max > nyquist_hz {
            return Err(ConfigError::AboveNyquist {
                max_hz: self.frequency.max,
                nyquist_hz,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_range_sampling_stays_inside() {
        let mut rng = StdRng::seed_from_u64(5);
        let range = ParamRange::new(20.0, 16000.0);
        for _ in 0..1000 {
            let v = range.sample(&mut rng);
            assert!(v >= 20.0 && v < 16000.0);
        }
        assert_eq!(ParamRange::new(3.0, 3.0).sample(&mut rng), 3.0);
    }

    #[test]
    fn test_invalid_range() {
        assert!(ParamRange::new(0.0, 1.0).validate("x").is_ok());
        assert!(matches!(
            ParamRange::new(2.0, 1.0).validate("x"),
            Err(ConfigError::InvalidRange { .. })
        ));
        assert!(ParamRange::new(0.0, f64::INFINITY).validate("x").is_err());
    }

    #[test]
    fn test_range_wider_than_f64_is_rejected() {
        // Both ends finite but max - min overflows to infinity
        let huge = ParamRange::new(-1e308, 1e308);
        assert!(matches!(
            huge.validate("amplitude"),
            Err(ConfigError::InvalidRange { ref name, .. }) if name == "amplitude"
        ));
        assert!(ParamRange::new(-1e307, 1e307).validate("x").is_ok());

        let config = DatasetConfig {
            amplitude: huge,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_param_check() {
        let rate = ParamSpec::integer("sample_rate", 1000.0, 48000.0, 44100.0);
        assert_eq!(rate.check(22050.4).unwrap(), 22050.0);
        assert!(matches!(
            rate.check(96000.0),
            Err(ConfigError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_default_controls_produce_valid_request() {
        let controls = ToneControls::default();
        for spec in controls.params() {
            assert!(spec.range.contains(spec.default), "{} default out of range", spec.name);
        }

        let request = controls.request(&controls.defaults()).unwrap();
        assert_eq!(request.frequencies, vec![440.0]);
        assert_eq!(request.num_samples(), 44100);
    }

    #[test]
    fn test_out_of_range_value_is_rejected() {
        let controls = ToneControls::default();
        let values = ToneValues {
            noise: 3.0,
            ..controls.defaults()
        };
        assert!(matches!(
            controls.request(&values),
            Err(ConfigError::OutOfRange { ref name, .. }) if name == "noise"
        ));
    }

    #[test]
    fn test_dataset_config_validation() {
        assert!(DatasetConfig::default().validate().is_ok());

        let no_samples = DatasetConfig {
            num_samples: 0,
            ..Default::default()
        };
        assert_eq!(no_samples.validate(), Err(ConfigError::NoSamples));

        let aliased = DatasetConfig {
            sample_rate: 16000.0,
            ..Default::default()
        };
        assert!(matches!(
            aliased.validate(),
            Err(ConfigError::AboveNyquist { .. })
        ));
    }
}
