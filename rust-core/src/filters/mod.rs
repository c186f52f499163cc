//! Window functions and spectral noise removal

pub mod windows;
pub mod spectral_gate;

pub use windows::{WindowType, generate_window};
pub use spectral_gate::SpectralGate;
