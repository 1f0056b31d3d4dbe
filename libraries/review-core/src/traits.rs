/// Core traits for the clip review pipeline
use crate::error::Result;
use crate::types::AudioSample;

/// Optional hint passed to decoders to help format detection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeHint {
    /// File extension without the dot (`wav`, `mp3`, ...)
    pub extension: Option<String>,
    /// MIME type reported by the byte source
    pub mime_type: Option<String>,
}

impl DecodeHint {
    /// Hint from a URL or file name, using its extension if present
    pub fn from_name(name: &str) -> Self {
        let path = name.split(['?', '#']).next().unwrap_or(name);
        let extension = path
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty() && !ext.contains('/'));

        Self {
            extension,
            mime_type: None,
        }
    }
}

/// Audio decoder trait
///
/// Implementers decode raw encoded bytes into an `AudioSample`.
/// A failed decode surfaces as an error that the orchestrator handles
/// per item.
pub trait AudioDecoder: Send {
    /// Decode a complete in-memory file
    ///
    /// # Errors
    /// Returns an error if the bytes cannot be probed or decoded
    fn decode_bytes(&mut self, bytes: &[u8], hint: &DecodeHint) -> Result<AudioSample>;

    /// Check if the decoder supports the given extension
    fn supports_extension(&self, extension: &str) -> bool;
}
