//! Labeled band-energy datasets of random single tones
//!
//! Each example is one noisy cosine with a random amplitude, phase and
//! carrier frequency; its label says whether the carrier lies above a
//! frequency threshold.

use crate::config::DatasetConfig;
use crate::error::DatasetError;
use crate::features::FeatureExtractor;
use crate::signal::{synthesize, SynthesisRequest};
use ndarray::{Array1, Array2, Axis};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// High/low frequency class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ToneLabel {
    Low = 0,
    High = 1,
}

impl ToneLabel {
    /// `High` iff `frequency` strictly exceeds `threshold`
    pub fn from_frequency(frequency: f64, threshold: f64) -> Self {
        if frequency > threshold {
            ToneLabel::High
        } else {
            ToneLabel::Low
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Feature matrix plus labels
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// One row per example, one column per band
    pub features: Array2<f64>,
    pub labels: Vec<ToneLabel>,
    /// Carrier frequency drawn for each example, in Hz
    pub frequencies: Vec<f64>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn num_bands(&self) -> usize {
        self.features.ncols()
    }

    /// Rows at `indices`, in that order
    pub fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            features: self.features.select(Axis(0), indices),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
            frequencies: indices.iter().map(|&i| self.frequencies[i]).collect(),
        }
    }

    /// Shuffle and split into (train, test)
    ///
    /// The test part holds `round(len * test_fraction)` rows, kept between
    /// one row and `len - 1` rows. Datasets with fewer than two rows are
    /// rejected.
    pub fn train_test_split<R: Rng + ?Sized>(
        &self,
        test_fraction: f64,
        rng: &mut R,
    ) -> Result<(Dataset, Dataset), DatasetError> {
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(DatasetError::InvalidSplit(test_fraction));
        }

        let n = self.len();
        if n < 2 {
            return Err(DatasetError::TooFewRowsToSplit(n));
        }
        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(rng);

        let n_test = ((n as f64 * test_fraction).round() as usize)
            .clamp(1, n - 1);
        let (test, train) = indices.split_at(n_test);

        Ok((self.select(train), self.select(test)))
    }
}

/// Build a labeled dataset of random single tones
///
/// Per example the generator is advanced in a fixed order: amplitude,
/// phase, noise coin (0 or 1), noise scale, carrier frequency, then one
/// normal draw per signal sample. Equal seeds therefore give equal datasets.
pub fn build_dataset<R: Rng + ?Sized>(
    config: &DatasetConfig,
    rng: &mut R,
) -> Result<Dataset, DatasetError> {
    config.validate()?;

    debug!(
        samples = config.num_samples,
        bands = config.num_bands,
        threshold_hz = config.threshold_hz,
        "Building tone dataset"
    );

    let mut extractor = FeatureExtractor::new(config.num_bands);
    let mut features = Array2::zeros((config.num_samples, config.num_bands));
    let mut labels = Vec::with_capacity(config.num_samples);
    let mut frequencies = Vec::with_capacity(config.num_samples);

    for i in 0..config.num_samples {
        let amplitude = config.amplitude.sample(rng);
        let phase = config.phase.sample(rng);
        let noisy: u8 = rng.gen_range(0..=1);
        let noise_scale = f64::from(noisy) * config.noise_scale.sample(rng);
        let frequency = config.frequency.sample(rng);

        let request = SynthesisRequest::single_tone(
            config.sample_rate,
            amplitude,
            frequency,
            phase,
            noise_scale,
            config.duration,
        );
        let signal = synthesize(&request, rng)?;
        let row = extractor.extract(&signal.samples)?;

        let label = ToneLabel::from_frequency(frequency, config.threshold_hz);
        trace!(index = i, frequency, amplitude, noise_scale, ?label, "Generated example");

        features.row_mut(i).assign(&Array1::from_vec(row));
        labels.push(label);
        frequencies.push(frequency);
    }

    let high = labels.iter().filter(|&&l| l == ToneLabel::High).count();
    debug!(high, low = labels.len() - high, "Tone dataset ready");
    if high == 0 || high == labels.len() {
        warn!(
            samples = labels.len(),
            threshold_hz = config.threshold_hz,
            "Every example landed in one class"
        );
    }

    Ok(Dataset {
        features,
        labels,
        frequencies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParamRange;
    use crate::error::{ConfigError, FeatureError};
    use crate::features::extract_features;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_config() -> DatasetConfig {
        DatasetConfig {
            num_samples: 40,
            duration: 0.01,
            num_bands: 8,
            ..Default::default()
        }
    }

    #[test]
    fn test_label_threshold() {
        assert_eq!(ToneLabel::from_frequency(9000.0, 8000.0), ToneLabel::High);
        assert_eq!(ToneLabel::from_frequency(500.0, 8000.0), ToneLabel::Low);
        // Strictly greater
        assert_eq!(ToneLabel::from_frequency(8000.0, 8000.0), ToneLabel::Low);
        assert_eq!(ToneLabel::High.index(), 1);
    }

    #[test]
    fn test_shapes_and_labels() {
        let config = small_config();
        let dataset = build_dataset(&config, &mut StdRng::seed_from_u64(11)).unwrap();

        assert_eq!(dataset.features.dim(), (40, 8));
        assert_eq!(dataset.len(), 40);
        assert!(dataset.features.iter().all(|v| v.is_finite() && *v >= 0.0));

        for (&freq, &label) in dataset.frequencies.iter().zip(&dataset.labels) {
            assert!(config.frequency.contains(freq));
            assert_eq!(label, ToneLabel::from_frequency(freq, config.threshold_hz));
        }
    }

    #[test]
    fn test_same_seed_same_dataset() {
        let config = small_config();
        let a = build_dataset(&config, &mut StdRng::seed_from_u64(2024)).unwrap();
        let b = build_dataset(&config, &mut StdRng::seed_from_u64(2024)).unwrap();
        let c = build_dataset(&config, &mut StdRng::seed_from_u64(2025)).unwrap();

        assert_eq!(a, b);
        assert_ne!(a.frequencies, c.frequencies);
    }

    #[test]
    fn test_errors_propagate() {
        let mut rng = StdRng::seed_from_u64(0);

        let bad_range = DatasetConfig {
            amplitude: ParamRange::new(1.0, 0.0),
            ..small_config()
        };
        assert!(matches!(
            build_dataset(&bad_range, &mut rng),
            Err(DatasetError::Config(ConfigError::InvalidRange { .. }))
        ));

        // 0.01 s at 44.1 kHz → 441 samples → 221 bins
        let too_many_bands = DatasetConfig {
            num_bands: 300,
            ..small_config()
        };
        assert_eq!(
            build_dataset(&too_many_bands, &mut rng),
            Err(DatasetError::Feature(FeatureError::InvalidBandCount {
                bands: 300,
                bins: 221
            }))
        );
    }

    #[test]
    fn test_train_test_split() {
        let dataset = build_dataset(&small_config(), &mut StdRng::seed_from_u64(3)).unwrap();
        let (train, test) = dataset
            .train_test_split(0.25, &mut StdRng::seed_from_u64(4))
            .unwrap();

        assert_eq!(test.len(), 10);
        assert_eq!(train.len(), 30);
        assert_eq!(train.num_bands(), 8);

        let mut all: Vec<f64> = train.frequencies.iter().chain(&test.frequencies).copied().collect();
        let mut original = dataset.frequencies.clone();
        all.sort_by(|a, b| a.total_cmp(b));
        original.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(all, original);

        assert!(matches!(
            dataset.train_test_split(1.0, &mut StdRng::seed_from_u64(4)),
            Err(DatasetError::InvalidSplit(_))
        ));
    }

    #[test]
    fn test_split_needs_two_rows() {
        let config = DatasetConfig {
            num_samples: 1,
            ..small_config()
        };
        let single = build_dataset(&config, &mut StdRng::seed_from_u64(8)).unwrap();
        assert_eq!(
            single.train_test_split(0.5, &mut StdRng::seed_from_u64(8)),
            Err(DatasetError::TooFewRowsToSplit(1))
        );

        let pair = build_dataset(
            &DatasetConfig {
                num_samples: 2,
                ..small_config()
            },
            &mut StdRng::seed_from_u64(8),
        )
        .unwrap();
        let (train, test) = pair
            .train_test_split(0.9, &mut StdRng::seed_from_u64(8))
            .unwrap();
        assert_eq!((train.len(), test.len()), (1, 1));
    }

    #[test]
    fn test_noise_only_when_coin_lands_on_one() {
        let config = DatasetConfig {
            noise_scale: ParamRange::new(0.5, 0.5),
            ..small_config()
        };
        let dataset = build_dataset(&config, &mut StdRng::seed_from_u64(31)).unwrap();

        // Replay the same draws, synthesizing every example without noise
        let mut replay = StdRng::seed_from_u64(31);
        let mut clean_rows = 0;
        let mut noisy_rows = 0;
        for (i, row) in dataset.features.rows().into_iter().enumerate() {
            let amplitude = config.amplitude.sample(&mut replay);
            let phase = config.phase.sample(&mut replay);
            let coin: u8 = replay.gen_range(0..=1);
            let _scale = config.noise_scale.sample(&mut replay);
            let frequency = config.frequency.sample(&mut replay);
            assert_eq!(frequency, dataset.frequencies[i]);

            let request = SynthesisRequest::single_tone(
                config.sample_rate,
                amplitude,
                frequency,
                phase,
                0.0,
                config.duration,
            );
            let noiseless = synthesize(&request, &mut replay).unwrap();
            let expected = extract_features(&noiseless.samples, config.num_bands).unwrap();

            if coin == 0 {
                assert_eq!(row.to_vec(), expected, "row {} should be noise-free", i);
                clean_rows += 1;
            } else {
                assert_ne!(row.to_vec(), expected, "row {} should carry noise", i);
                noisy_rows += 1;
            }
        }
        assert!(clean_rows > 0 && noisy_rows > 0);
    }

    #[test]
    fn test_single_class_dataset_still_builds() {
        let config = DatasetConfig {
            threshold_hz: 20000.0,
            ..small_config()
        };
        let dataset = build_dataset(&config, &mut StdRng::seed_from_u64(12)).unwrap();
        assert!(dataset.labels.iter().all(|&l| l == ToneLabel::Low));
    }

    #[test]
    fn test_overflowing_range_is_an_error() {
        let config = DatasetConfig {
            amplitude: ParamRange::new(-1e308, 1e308),
            ..small_config()
        };
        assert!(matches!(
            build_dataset(&config, &mut StdRng::seed_from_u64(0)),
            Err(DatasetError::Config(ConfigError::InvalidRange { .. }))
        ));
    }
}
