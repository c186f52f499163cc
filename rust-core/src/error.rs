//! Error types for synthesis, feature extraction and classification

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SynthesisError {
    #[error("Shape mismatch: {amplitudes} amplitudes, {frequencies} frequencies, {phases} phases")]
    ShapeMismatch {
        amplitudes: usize,
        frequencies: usize,
        phases: usize,
    },

    #[error("Sample rate must be finite and positive (got {0})")]
    InvalidSampleRate(f64),

    #[error("Duration must be finite and positive (got {0} s)")]
    InvalidDuration(f64),

    #[error("Noise scale must be finite and non-negative (got {0})")]
    InvalidNoiseScale(f64),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeatureError {
    #[error("Cannot extract features from an empty signal")]
    EmptySignal,

    #[error("Band count {bands} is outside 1..={bins} for a spectrum of {bins} bins")]
    InvalidBandCount { bands: usize, bins: usize },

    #[error("FFT processing failed: {0}")]
    Fft(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Gate threshold must be finite and non-negative (got {0})")]
    InvalidThreshold(f64),

    #[error("FFT processing failed: {0}")]
    Fft(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Parameter '{name}' = {value} is outside [{min}, {max}]")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Range for '{name}' is empty or not finite ([{min}, {max}])")]
    InvalidRange { name: String, min: f64, max: f64 },

    #[error("Carrier frequency range tops out at {max_hz} Hz, above Nyquist ({nyquist_hz} Hz)")]
    AboveNyquist { max_hz: f64, nyquist_hz: f64 },

    #[error("Sample count must be at least 1")]
    NoSamples,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    #[error("Invalid dataset configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("Feature extraction failed: {0}")]
    Feature(#[from] FeatureError),

    #[error("Test fraction must lie strictly between 0 and 1 (got {0})")]
    InvalidSplit(f64),

    #[error("Need at least 2 rows to split, dataset has {0}")]
    TooFewRowsToSplit(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    #[error("Training set is empty")]
    EmptyTrainingSet,

    #[error("Got {features} feature rows but {labels} labels")]
    LabelCountMismatch { features: usize, labels: usize },

    #[error("Expected {expected} features per row, got {actual}")]
    FeatureWidthMismatch { expected: usize, actual: usize },

    #[error("Classifier has not been fitted")]
    NotFitted,

    #[error("Need at least 2 classes, found {0}")]
    TooFewClasses(usize),

    #[error("Neighbour count k must be at least 1")]
    ZeroNeighbors,
}

/// Crate-level error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LabError {
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

pub type Result<T> = std::result::Result<T, LabError>;
