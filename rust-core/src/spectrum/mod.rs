//! Spectral analysis with FFT

pub mod fft;
pub mod windowing;
pub mod analysis;

pub use fft::{FftEngine, two_sided_spectrum, fft_frequencies};
pub use windowing::apply_window;
pub use analysis::{AnalyzerConfig, Spectrum, SpectrumAnalyzer};
