//! Clip Review Audio
//!
//! Audio stages of the clip review pipeline.
//!
//! This crate provides:
//! - Decoding of whole in-memory files via Symphonia (MP3, FLAC, OGG, WAV, AAC)
//! - Silence boundary detection and sample-accurate trimming
//! - An offline speech-band noise filter built on biquad sections
//! - 16-bit PCM WAV encoding and an adapter for external MP3 encoders
//! - Min/max waveform envelopes for display
//!
//! # Example: Trim and encode
//!
//! ```rust
//! use review_audio::{detect_silence, encode_wav, trim};
//! use review_core::AudioSample;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // 1 s of silence, 1 s of tone, 1 s of silence at 8 kHz
//! let mut samples = vec![0.0_f32; 24_000];
//! for (i, s) in samples[8_000..16_000].iter_mut().enumerate() {
//!     *s = 0.5 * (i as f32 * 0.3).sin();
//! }
//! let clip = AudioSample::mono(samples, 8_000)?;
//!
//! let bounds = detect_silence(&clip);
//! let trimmed = trim(&clip, bounds.start, bounds.end)?;
//! assert!(trimmed.frames() < clip.frames());
//!
//! let wav = encode_wav(&trimmed)?;
//! assert_eq!(&wav.bytes[0..4], b"RIFF");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

mod decoder;
pub mod effects;
pub mod encode;
mod error;
pub mod silence;
mod trim;
pub mod waveform;

pub use decoder::SymphoniaDecoder;
pub use effects::NoiseFilter;
pub use encode::{encode_wav, EncodedAudio, Mp3Capability, Mp3Encoder, OutputFormat};
pub use error::{AudioError, Result};
pub use silence::{detect_silence, SilenceBounds, SilenceDetector};
pub use trim::{trim, trim_to};
pub use waveform::{marker_percent, WaveformCanvas, WaveformEnvelope};
