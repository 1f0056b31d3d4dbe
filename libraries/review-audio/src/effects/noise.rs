/// Speech-band noise filter
///
/// A highpass biquad at 80 Hz feeding a lowpass biquad at 8 kHz, rendered
/// offline. This is a bandpass approximation that removes rumble and hiss;
/// it does not estimate or subtract a noise profile.
use super::chain::EffectChain;
use super::filter::BiquadStage;
use super::render::OfflineRenderer;
use crate::error::Result;
use review_core::AudioSample;

/// Highpass cutoff in Hz
pub const NOISE_HIGHPASS_HZ: f32 = 80.0;

/// Lowpass cutoff in Hz
pub const NOISE_LOWPASS_HZ: f32 = 8_000.0;

/// Length-preserving speech-band filter
pub struct NoiseFilter {
    renderer: OfflineRenderer,
    highpass_hz: f32,
    lowpass_hz: f32,
}

impl NoiseFilter {
    /// Create the standard 80 Hz - 8 kHz filter
    pub fn new() -> Self {
        Self::with_band(NOISE_HIGHPASS_HZ, NOISE_LOWPASS_HZ)
    }

    /// Create a filter with a custom pass band
    pub fn with_band(highpass_hz: f32, lowpass_hz: f32) -> Self {
        let mut chain = EffectChain::new();
        chain.add_effect(Box::new(BiquadStage::highpass(highpass_hz)));
        chain.add_effect(Box::new(BiquadStage::lowpass(lowpass_hz)));

        Self {
            renderer: OfflineRenderer::new(chain),
            highpass_hz,
            lowpass_hz,
        }
    }

    /// Pass band as `(highpass_hz, lowpass_hz)`
    pub fn band(&self) -> (f32, f32) {
        (self.highpass_hz, self.lowpass_hz)
    }

    /// Filter `input` into a new sample of identical shape
    pub fn apply(&mut self, input: &AudioSample) -> Result<AudioSample> {
        self.renderer.render(input)
    }
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self::new()
    }
}
