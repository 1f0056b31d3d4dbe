/// MP3 encoder adapter
///
/// No MP3 encoder is bundled; an external capability plugs in through
/// [`Mp3Capability`]. The adapter only converts PCM and drives the encoder
/// in fixed-size blocks.
use super::{sample_to_i16, EncodedAudio, OutputFormat};
use crate::error::{AudioError, Result};
use review_core::AudioSample;
use std::sync::Arc;
use tracing::debug;

/// Samples per channel handed to the encoder per call (one MPEG-1 frame)
pub const MP3_BLOCK_SIZE: usize = 1152;

/// Fixed output bitrate
pub const MP3_BITRATE_KBPS: u32 = 128;

/// A running MP3 encoder session
pub trait Mp3Backend: Send {
    /// Encode one block of left/right PCM (equal lengths, at most
    /// `MP3_BLOCK_SIZE`), returning any bytes produced so far
    fn encode_block(&mut self, left: &[i16], right: &[i16]) -> Result<Vec<u8>>;

    /// Flush buffered frames at the end of the stream
    fn flush(&mut self) -> Result<Vec<u8>>;
}

/// Factory for MP3 encoder sessions
pub trait Mp3Capability: Send + Sync {
    /// Start a session for `channels` (1 or 2) at `sample_rate`
    fn open(&self, channels: u16, sample_rate: u32, bitrate_kbps: u32) -> Result<Box<dyn Mp3Backend>>;
}

/// Feeds an `AudioSample` to an external MP3 capability
#[derive(Clone)]
pub struct Mp3Encoder {
    capability: Arc<dyn Mp3Capability>,
    bitrate_kbps: u32,
}

impl Mp3Encoder {
    /// Create an adapter at the fixed bitrate
    pub fn new(capability: Arc<dyn Mp3Capability>) -> Self {
        Self {
            capability,
            bitrate_kbps: MP3_BITRATE_KBPS,
        }
    }

    /// Override the bitrate
    pub fn with_bitrate(mut self, bitrate_kbps: u32) -> Self {
        self.bitrate_kbps = bitrate_kbps;
        self
    }

    /// Encode `sample` into a single MP3 blob
    ///
    /// Mono sources are duplicated onto both the left and right inputs;
    /// channels beyond the second are ignored.
    pub fn encode(&self, sample: &AudioSample) -> Result<EncodedAudio> {
        let (left, right) = Self::split_pcm(sample)?;
        let channels = sample.channel_count().min(2) as u16;

        let mut backend = self
            .capability
            .open(channels, sample.sample_rate().as_hz(), self.bitrate_kbps)?;

        let mut bytes = Vec::new();
        let mut blocks = 0_usize;
        for (l, r) in left.chunks(MP3_BLOCK_SIZE).zip(right.chunks(MP3_BLOCK_SIZE)) {
            bytes.extend(backend.encode_block(l, r)?);
            blocks += 1;
        }
        bytes.extend(backend.flush()?);

        if bytes.is_empty() && !sample.is_empty() {
            return Err(AudioError::Encode("MP3 encoder produced no output".to_string()));
        }

        debug!(blocks, bytes = bytes.len(), bitrate = self.bitrate_kbps, "Encoded MP3");

        Ok(EncodedAudio {
            bytes,
            format: OutputFormat::Mp3,
        })
    }

    /// Left/right 16-bit PCM arrays
    fn split_pcm(sample: &AudioSample) -> Result<(Vec<i16>, Vec<i16>)> {
        let left_channel = sample
            .channel(0)
            .ok_or_else(|| AudioError::Encode("no channels to encode".to_string()))?;
        let right_channel = sample.channel(1).unwrap_or(left_channel);

        let left = left_channel.iter().map(|&s| sample_to_i16(s)).collect();
        let right = right_channel.iter().map(|&s| sample_to_i16(s)).collect();
        Ok((left, right))
    }
}
