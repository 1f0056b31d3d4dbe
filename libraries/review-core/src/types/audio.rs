/// Audio-related types
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{Result, ReviewError};

/// Sample rate in Hz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleRate(pub u32);

impl SampleRate {
    /// 44.1 kHz
    pub const CD_QUALITY: Self = Self(44_100);
    /// 48 kHz
    pub const DVD_QUALITY: Self = Self(48_000);

    /// Create a new sample rate
    #[must_use]
    pub fn new(hz: u32) -> Self {
        Self(hz)
    }

    /// Get the sample rate as Hz
    pub fn as_hz(&self) -> u32 {
        self.0
    }

    /// Number of frames covering `millis` milliseconds (floored)
    pub fn frames_for_ms(&self, millis: u32) -> usize {
        (u64::from(self.0) * u64::from(millis) / 1000) as usize
    }
}

/// Decoded audio clip
///
/// Samples are stored planar (one `Vec<f32>` per channel) in [-1.0, 1.0].
/// The sample data is shared and never mutated: every transform builds a new
/// `AudioSample`, so cloning is cheap.
#[derive(Debug, Clone)]
pub struct AudioSample {
    channels: Arc<[Vec<f32>]>,
    sample_rate: SampleRate,
    frames: usize,
}

impl AudioSample {
    /// Create a new audio sample from planar channel data
    ///
    /// # Errors
    /// Returns an error if there are no channels, the sample rate is zero,
    /// or the channels have different lengths
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self> {
        if channels.is_empty() {
            return Err(ReviewError::invalid_input("audio sample needs at least one channel"));
        }
        if sample_rate == 0 {
            return Err(ReviewError::invalid_input("sample rate must be non-zero"));
        }

        let frames = channels[0].len();
        if let Some(bad) = channels.iter().position(|ch| ch.len() != frames) {
            return Err(ReviewError::invalid_input(format!(
                "channel {} has {} frames, expected {}",
                bad,
                channels[bad].len(),
                frames
            )));
        }

        Ok(Self {
            channels: channels.into(),
            sample_rate: SampleRate::new(sample_rate),
            frames,
        })
    }

    /// Create a single-channel audio sample
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Result<Self> {
        Self::new(vec![samples], sample_rate)
    }

    /// Create an audio sample from interleaved data
    pub fn from_interleaved(samples: &[f32], channel_count: usize, sample_rate: u32) -> Result<Self> {
        if channel_count == 0 || samples.len() % channel_count != 0 {
            return Err(ReviewError::invalid_input(format!(
                "sample count {} is not divisible by channel count {}",
                samples.len(),
                channel_count
            )));
        }

        let frames = samples.len() / channel_count;
        let mut channels = vec![Vec::with_capacity(frames); channel_count];
        for frame in samples.chunks_exact(channel_count) {
            for (channel, &value) in channels.iter_mut().zip(frame) {
                channel.push(value);
            }
        }

        Self::new(channels, sample_rate)
    }

    /// Build a new sample with the same rate, applying `f` to each channel
    pub fn map_channels<F>(&self, mut f: F) -> Result<Self>
    where
        F: FnMut(&[f32]) -> Vec<f32>,
    {
        let channels = self.channels.iter().map(|ch| f(ch)).collect();
        Self::new(channels, self.sample_rate.as_hz())
    }

    /// Get the sample rate
    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    /// Number of channels
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Get the number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Samples of one channel
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// Iterate over all channels
    pub fn channels(&self) -> impl Iterator<Item = &[f32]> {
        self.channels.iter().map(Vec::as_slice)
    }

    /// Get the duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.frames as f64 / f64::from(self.sample_rate.as_hz())
    }

    /// Check if the sample has no frames
    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    /// Interleave all channels (L, R, L, R, ...)
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.frames * self.channels.len());
        for i in 0..self.frames {
            for channel in self.channels.iter() {
                out.push(channel[i]);
            }
        }
        out
    }

    /// Whether two samples share the same underlying storage
    pub fn shares_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.channels, &other.channels)
    }
}

impl PartialEq for AudioSample {
    fn eq(&self, other: &Self) -> bool {
        self.sample_rate == other.sample_rate && self.channels == other.channels
    }
}
