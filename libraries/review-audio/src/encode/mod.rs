//! Persisting processed clips
//!
//! The WAV encoder is always available. The MP3 adapter is used only when an
//! external MP3 capability has been supplied; callers treat both outputs the
//! same way through [`EncodedAudio`].

mod mp3;
mod wav;

pub use mp3::{Mp3Backend, Mp3Capability, Mp3Encoder, MP3_BITRATE_KBPS, MP3_BLOCK_SIZE};
pub use wav::{encode_wav, WAV_HEADER_LEN};

/// Container format of an encoded clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Canonical 16-bit PCM WAV
    Wav,
    /// MPEG-1 Layer III
    Mp3,
}

impl OutputFormat {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Wav => "wav",
            OutputFormat::Mp3 => "mp3",
        }
    }

    /// MIME type for uploads
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Wav => "audio/wav",
            OutputFormat::Mp3 => "audio/mpeg",
        }
    }
}

/// Encoded bytes plus their container format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAudio {
    /// Complete file contents
    pub bytes: Vec<u8>,
    /// Container format of `bytes`
    pub format: OutputFormat,
}

impl EncodedAudio {
    /// File name for `stem` with the format's extension
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.format.extension())
    }
}

/// Convert a float sample to signed 16-bit PCM
///
/// Clamps to [-1, 1], scales negatives by 32768 and non-negatives by 32767,
/// then truncates toward zero.
#[inline]
pub fn sample_to_i16(sample: f32) -> i16 {
    let s = if sample.is_nan() { 0.0 } else { sample.clamp(-1.0, 1.0) };
    if s < 0.0 {
        (s * 32768.0) as i16
    } else {
        (s * 32767.0) as i16
    }
}
