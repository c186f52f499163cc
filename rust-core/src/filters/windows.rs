//! Window functions for leakage demonstrations
//!
//! All windows are generated in their symmetric form, so w[0] == w[M-1].

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WindowType {
    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/(M-1))
    Hann,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(M-1))
    Hamming,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/(M-1)) + 0.08*cos(4πn/(M-1))
    Blackman,

    /// Rectangular window (no tapering, maximum leakage)
    #[default]
    Rectangular,
}

impl WindowType {
    /// Null-to-null main lobe width in DFT bins
    pub fn mainlobe_width_bins(&self) -> f64 {
        match self {
            WindowType::Rectangular => 2.0,
            WindowType::Hann => 4.0,
            WindowType::Hamming => 4.0,
            WindowType::Blackman => 6.0,
        }
    }

    /// Level of the highest side lobe relative to the main lobe, in dB
    pub fn sidelobe_level_db(&self) -> f64 {
        match self {
            WindowType::Rectangular => -13.3,
            WindowType::Hann => -31.5,
            WindowType::Hamming => -42.7,
            WindowType::Blackman => -58.1,
        }
    }

    /// Mean window coefficient for a window of `length` samples
    pub fn coherent_gain(&self, length: usize) -> f64 {
        if length == 0 {
            return 1.0;
        }
        generate_window(*self, length).iter().sum::<f64>() / length as f64
    }
}

/// Generate window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (M)
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..M-1
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    // A single-sample window has no taper to speak of
    if length <= 1 || window_type == WindowType::Rectangular {
        return vec![1.0; length];
    }

    let denom = (length - 1) as f64;
    (0..length)
        .map(|n| {
            let angle = 2.0 * PI * n as f64 / denom;
            match window_type {
                WindowType::Hann => 0.5 - 0.5 * angle.cos(),
                WindowType::Hamming => 0.54 - 0.46 * angle.cos(),
                WindowType::Blackman => 0.42 - 0.5 * angle.cos() + 0.08 * (2.0 * angle).cos(),
                WindowType::Rectangular => 1.0,
            }
        })
        .collect()
}
