//! Fourier Lab - DSP Core for the Fourier Transform Notebooks
//!
//! Signal synthesis, windowed spectra, spectral noise gating and
//! band-energy features for small high/low tone classifiers.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod classify;
pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod filters;
pub mod signal;
pub mod spectrum;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use classify::{Classifier, KNearestNeighbors, Mlp, MlpOptions};
pub use config::{DatasetConfig, ParamRange, ToneControls};
pub use dataset::{build_dataset, Dataset, ToneLabel};
pub use error::{LabError, Result};
pub use features::{band_partition, extract_features, FeatureExtractor};
pub use filters::{SpectralGate, WindowType};
pub use signal::{synthesize, Signal, SynthesisRequest};
pub use spectrum::SpectrumAnalyzer;
