//! Loudness normalization to a fixed target
//!
//! A single static gain derived from the gated estimate, followed by a hard
//! clip. There is no limiter: material that would need more headroom than it
//! has is clipped.

use crate::analyzer::measure_loudness;
use crate::error::Result;
use review_core::AudioSample;
use tracing::debug;

/// Target loudness in LUFS
pub const TARGET_LUFS: f64 = -18.0;

/// Brings clips to a target loudness
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoudnessNormalizer {
    target_lufs: f64,
}

impl LoudnessNormalizer {
    /// Normalizer for [`TARGET_LUFS`]
    pub fn new() -> Self {
        Self {
            target_lufs: TARGET_LUFS,
        }
    }

    /// Normalizer for a different target
    pub fn with_target(target_lufs: f64) -> Self {
        Self { target_lufs }
    }

    /// Target loudness in LUFS
    pub fn target_lufs(&self) -> f64 {
        self.target_lufs
    }

    /// Linear gain that moves `current_lufs` to the target
    pub fn gain_for(&self, current_lufs: f64) -> f64 {
        10f64.powf((self.target_lufs - current_lufs) / 20.0)
    }

    /// Scale every channel of `input` and clip to [-1, 1]
    ///
    /// The gain is measured on `input` itself, so a second pass over an
    /// already normalized clip is (nearly) a no-op.
    pub fn normalize(&self, input: &AudioSample) -> Result<AudioSample> {
        let current = measure_loudness(input);
        let gain = self.gain_for(current) as f32;

        let output = input.map_channels(|channel| {
            channel.iter().map(|&s| (s * gain).clamp(-1.0, 1.0)).collect()
        })?;

        debug!(
            lufs = current,
            target = self.target_lufs,
            gain = f64::from(gain),
            "Normalized loudness"
        );

        Ok(output)
    }
}

impl Default for LoudnessNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
