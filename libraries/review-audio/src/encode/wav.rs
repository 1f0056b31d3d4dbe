/// Canonical 16-bit PCM WAV serialization
use super::{sample_to_i16, EncodedAudio, OutputFormat};
use crate::error::{AudioError, Result};
use review_core::AudioSample;

/// Size of the RIFF + fmt + data chunk headers
pub const WAV_HEADER_LEN: usize = 44;

const BITS_PER_SAMPLE: u16 = 16;
const PCM_FORMAT_TAG: u16 = 1;

/// Encode `sample` as a RIFF/WAVE file
///
/// The output is a pure function of the input: the same sample always
/// produces byte-identical files.
pub fn encode_wav(sample: &AudioSample) -> Result<EncodedAudio> {
    let channels = u16::try_from(sample.channel_count())
        .map_err(|_| AudioError::Encode(format!("too many channels: {}", sample.channel_count())))?;
    let sample_rate = sample.sample_rate().as_hz();
    let block_align = channels * (BITS_PER_SAMPLE / 8);
    let byte_rate = sample_rate
        .checked_mul(u32::from(block_align))
        .ok_or_else(|| AudioError::Encode("byte rate overflows".to_string()))?;
    let data_size = u32::try_from(sample.frames() * usize::from(block_align))
        .ok()
        .filter(|size| *size <= u32::MAX - 36)
        .ok_or_else(|| AudioError::Encode("clip too long for a WAV container".to_string()))?;

    let mut bytes = Vec::with_capacity(WAV_HEADER_LEN + data_size as usize);

    // RIFF chunk
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_size).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    // fmt chunk
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16_u32.to_le_bytes());
    bytes.extend_from_slice(&PCM_FORMAT_TAG.to_le_bytes());
    bytes.extend_from_slice(&channels.to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&byte_rate.to_le_bytes());
    bytes.extend_from_slice(&block_align.to_le_bytes());
    bytes.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data chunk, frames interleaved
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_size.to_le_bytes());
    let planar: Vec<&[f32]> = sample.channels().collect();
    for frame in 0..sample.frames() {
        for channel in &planar {
            bytes.extend_from_slice(&sample_to_i16(channel[frame]).to_le_bytes());
        }
    }

    Ok(EncodedAudio {
        bytes,
        format: OutputFormat::Wav,
    })
}
