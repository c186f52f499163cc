//! Windowing applied before the FFT to reduce spectral leakage

use crate::filters::windows::{generate_window, WindowType};

/// Apply window to signal
///
/// # Arguments
/// * `signal` - Input signal
/// * `window_type` - Type of window to apply
///
/// # Returns
/// Windowed signal
pub fn apply_window(signal: &[f64], window_type: WindowType) -> Vec<f64> {
    let mut windowed = signal.to_vec();
    apply_window_inplace(&mut windowed, window_type);
    windowed
}

/// Apply window in-place
pub fn apply_window_inplace(signal: &mut [f64], window_type: WindowType) {
    if window_type == WindowType::Rectangular {
        return;
    }
    let window = generate_window(window_type, signal.len());

    for (s, w) in signal.iter_mut().zip(window.iter()) {
        *s *= w;
    }
}

/// Amplitude correction factor (inverse coherent gain)
///
/// Multiply FFT magnitudes of a windowed signal by this to read tone
/// amplitudes as if no window had been applied.
pub fn window_correction_factor(window_type: WindowType, length: usize) -> f64 {
    let gain = window_type.coherent_gain(length);
    if gain > 0.0 {
        1.0 / gain
    } else {
        1.0
    }
}
