//! Synthetic test signals

pub mod synth;

pub use synth::{synthesize, tone, Signal, SynthesisRequest};
