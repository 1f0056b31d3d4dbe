//! EBU R128 reference measurement
//!
//! Standards-compliant integrated loudness via the ebur128 crate, used to
//! report alongside the simplified estimate.

use crate::error::{LoudnessError, Result};
use ebur128::{EbuR128, Mode};
use review_core::AudioSample;

/// Integrated loudness of `sample` per EBU R128, in LUFS
///
/// # Errors
/// Returns error for unsupported rates or channel counts, and
/// [`LoudnessError::SilentAudio`] when every block is gated out.
pub fn reference_loudness(sample: &AudioSample) -> Result<f64> {
    let rate = sample.sample_rate().as_hz();
    if !(8000..=384000).contains(&rate) {
        return Err(LoudnessError::InvalidSampleRate(rate));
    }
    let channels = sample.channel_count();
    if !(1..=8).contains(&channels) {
        return Err(LoudnessError::InvalidChannelCount(channels));
    }

    let mut meter = EbuR128::new(channels as u32, rate, Mode::I)?;
    meter.add_frames_f32(&sample.to_interleaved())?;

    let integrated = meter.loudness_global()?;
    if integrated.is_infinite() || integrated.is_nan() {
        return Err(LoudnessError::SilentAudio);
    }
    Ok(integrated)
}
