//! Error types for loudness analysis

use thiserror::Error;

/// Result type for loudness operations
pub type Result<T> = std::result::Result<T, LoudnessError>;

/// Errors that can occur during loudness analysis
#[derive(Error, Debug)]
pub enum LoudnessError {
    /// Invalid sample rate
    #[error("Invalid sample rate: {0} Hz (must be between 8000 and 384000)")]
    InvalidSampleRate(u32),

    /// Invalid channel count
    #[error("Invalid channel count: {0} (must be 1-8)")]
    InvalidChannelCount(usize),

    /// EBU R128 analysis error
    #[error("EBU R128 analysis failed: {0}")]
    AnalysisError(String),

    /// Audio is completely silent
    #[error("Audio is silent (no loudness data available)")]
    SilentAudio,

    /// Gain application produced an invalid buffer
    #[error("Invalid audio buffer: {0}")]
    InvalidBuffer(String),
}

impl From<ebur128::Error> for LoudnessError {
    fn from(err: ebur128::Error) -> Self {
        Self::AnalysisError(format!("{:?}", err))
    }
}

impl From<review_core::ReviewError> for LoudnessError {
    fn from(err: review_core::ReviewError) -> Self {
        Self::InvalidBuffer(err.to_string())
    }
}

impl From<LoudnessError> for review_core::ReviewError {
    fn from(err: LoudnessError) -> Self {
        review_core::ReviewError::loudness(err.to_string())
    }
}
