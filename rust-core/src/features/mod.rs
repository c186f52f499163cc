//! Spectral band-energy features

pub mod bands;
pub mod extract;

pub use bands::{band_of_bin, band_partition};
pub use extract::{band_rms, extract_features, FeatureExtractor};
