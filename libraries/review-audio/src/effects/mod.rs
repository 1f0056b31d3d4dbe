//! Offline audio effects
//!
//! This module provides a trait-based effect chain that is rendered offline
//! (non-realtime) over complete clips. All effects operate on f32 samples in
//! [-1.0, 1.0] range, one channel at a time.
//!
//! Available effects:
//! - **BiquadStage**: a single highpass or lowpass biquad section
//! - **NoiseFilter**: speech-band cascade (highpass 80 Hz into lowpass 8 kHz)

mod chain;
mod filter;
mod noise;
mod render;

pub use chain::{AudioEffect, EffectChain};
pub use filter::{BiquadStage, FilterKind};
pub use noise::{NoiseFilter, NOISE_HIGHPASS_HZ, NOISE_LOWPASS_HZ};
pub use render::OfflineRenderer;
