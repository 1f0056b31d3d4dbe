/// Audio decoder implementation using Symphonia
use crate::error::{AudioError, Result};
use review_core::{AudioDecoder as AudioDecoderTrait, AudioSample, DecodeHint};
use std::io::Cursor;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

/// Audio decoder using Symphonia
///
/// Supports: MP3, FLAC, OGG, WAV, AAC
///
/// Decodes a complete in-memory file into a planar `AudioSample`, keeping
/// the source channel layout (no downmix).
pub struct SymphoniaDecoder {
    /// Number of clips decoded by this instance (the decoder is reused for a
    /// whole review session)
    decoded_count: usize,
}

impl SymphoniaDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self { decoded_count: 0 }
    }

    /// Number of clips decoded so far
    pub fn decoded_count(&self) -> usize {
        self.decoded_count
    }

    /// Decode a complete file held in memory
    pub fn decode(&mut self, bytes: &[u8], hint: &DecodeHint) -> Result<AudioSample> {
        if bytes.is_empty() {
            return Err(AudioError::DecodeError("empty input".to_string()));
        }

        // Create media source
        let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes.to_vec())), Default::default());

        // Create a hint to help the format registry guess the format
        let mut probe_hint = Hint::new();
        if let Some(ext) = hint.extension.as_deref() {
            probe_hint.with_extension(ext);
        }
        if let Some(mime) = hint.mime_type.as_deref() {
            probe_hint.mime_type(mime);
        }

        // Probe the media source
        let probed = symphonia::default::get_probe()
            .format(
                &probe_hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| AudioError::Symphonia(format!("Failed to probe input: {}", e)))?;

        let mut format = probed.format;

        // Find the default track
        let track = format
            .default_track()
            .ok_or_else(|| AudioError::DecodeError("No audio tracks found".to_string()))?;

        let mut sample_rate = track.codec_params.sample_rate;
        let mut channel_count = track.codec_params.channels.map(|c| c.count());
        let track_id = track.id;

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| AudioError::Symphonia(format!("Failed to create decoder: {}", e)))?;

        let mut interleaved: Vec<f32> = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(symphonia::core::errors::Error::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(symphonia::core::errors::Error::ResetRequired) => break,
                Err(e) => {
                    return Err(AudioError::Symphonia(format!("Error reading packet: {}", e)));
                }
            };

            // Skip packets that are not for the default track
            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(symphonia::core::errors::Error::DecodeError(e)) => {
                    // Corrupt frames are skipped, the rest of the clip is still usable
                    warn!(error = %e, "Skipping undecodable packet");
                    continue;
                }
                Err(e) => return Err(AudioError::DecodeError(e.to_string())),
            };

            let spec = *decoded.spec();
            sample_rate.get_or_insert(spec.rate);
            let channels = *channel_count.get_or_insert(spec.channels.count());
            if spec.channels.count() != channels {
                return Err(AudioError::DecodeError(format!(
                    "channel count changed mid-stream ({} -> {})",
                    channels,
                    spec.channels.count()
                )));
            }

            let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
            buffer.copy_interleaved_ref(decoded);
            interleaved.extend_from_slice(buffer.samples());
        }

        let channels = channel_count
            .filter(|&c| c > 0)
            .ok_or_else(|| AudioError::DecodeError("Unknown channel layout".to_string()))?;
        let sample_rate = sample_rate
            .ok_or_else(|| AudioError::DecodeError("Unknown sample rate".to_string()))?;

        // Float sources may carry intersample overs, keep the [-1, 1] contract
        for sample in &mut interleaved {
            *sample = sample.clamp(-1.0, 1.0);
        }

        let sample = AudioSample::from_interleaved(&interleaved, channels, sample_rate)?;
        self.decoded_count += 1;

        debug!(
            frames = sample.frames(),
            channels,
            sample_rate,
            "Decoded clip"
        );

        Ok(sample)
    }
}

impl Default for SymphoniaDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioDecoderTrait for SymphoniaDecoder {
    fn decode_bytes(&mut self, bytes: &[u8], hint: &DecodeHint) -> review_core::Result<AudioSample> {
        Ok(self.decode(bytes, hint)?)
    }

    fn supports_extension(&self, extension: &str) -> bool {
        matches!(
            extension.to_lowercase().as_str(),
            "mp3" | "flac" | "ogg" | "oga" | "wav" | "m4a" | "aac"
        )
    }
}
