/// Audio-specific errors
use thiserror::Error;

/// Result type alias using `AudioError`
pub type Result<T> = std::result::Result<T, AudioError>;

/// Audio error types
#[derive(Error, Debug)]
pub enum AudioError {
    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Invalid audio buffer
    #[error("Invalid audio buffer: {0}")]
    InvalidBuffer(String),

    /// Filter construction or rendering error
    #[error("Filter error: {0}")]
    Filter(String),

    /// Encoding error
    #[error("Encode error: {0}")]
    Encode(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Symphonia error
    #[error("Symphonia error: {0}")]
    Symphonia(String),
}

impl From<review_core::ReviewError> for AudioError {
    fn from(err: review_core::ReviewError) -> Self {
        AudioError::InvalidBuffer(err.to_string())
    }
}

impl From<AudioError> for review_core::ReviewError {
    fn from(err: AudioError) -> Self {
        match err {
            AudioError::Encode(msg) => review_core::ReviewError::encode(msg),
            other => review_core::ReviewError::audio(other.to_string()),
        }
    }
}
