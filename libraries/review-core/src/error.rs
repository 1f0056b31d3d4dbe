/// Core error types for the clip review pipeline
use thiserror::Error;

use crate::types::ItemId;

/// Result type alias using `ReviewError`
pub type Result<T> = std::result::Result<T, ReviewError>;

/// Core error type shared by every review crate
#[derive(Error, Debug)]
pub enum ReviewError {
    /// Audio decoding/processing errors
    #[error("Audio error: {0}")]
    Audio(String),

    /// Loudness analysis errors
    #[error("Loudness error: {0}")]
    Loudness(String),

    /// Encoding errors (WAV/MP3)
    #[error("Encode error: {0}")]
    Encode(String),

    /// Review item not found in the active batch
    #[error("Review item not found: {0}")]
    ItemNotFound(ItemId),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl ReviewError {
    /// Create an audio error
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Create a loudness error
    pub fn loudness(msg: impl Into<String>) -> Self {
        Self::Loudness(msg.into())
    }

    /// Create an encode error
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
