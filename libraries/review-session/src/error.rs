//! Error types for review sessions

use crate::store::Activity;
use review_audio::AudioError;
use review_core::{ItemId, ReviewError};
use review_loudness::LoudnessError;
use thiserror::Error;

/// Errors that can occur while processing, editing or saving a batch
#[derive(Debug, Error)]
pub enum SessionError {
    /// Another long-running activity holds the batch
    #[error("Batch is busy: {0:?} in progress")]
    Busy(Activity),

    /// No item with this id in the batch
    #[error("Review item not found: {0}")]
    ItemNotFound(ItemId),

    /// The same id appears twice in one batch
    #[error("Duplicate item in batch: {0}")]
    DuplicateItem(ItemId),

    /// Boundary does not fit the item
    #[error("Invalid trim boundary: {0}")]
    InvalidBoundary(String),

    /// A collaborator rejected our credentials
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// A collaborator failed or returned an error response
    #[error("Collaborator failed: {0}")]
    Collaborator(String),

    /// The store no longer matches what the running activity expects
    #[error("Batch store inconsistency: {0}")]
    Inconsistent(String),

    /// Invalid collaborator URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Audio stage failed
    #[error(transparent)]
    Audio(#[from] AudioError),

    /// Loudness stage failed
    #[error(transparent)]
    Loudness(#[from] LoudnessError),

    /// Core type error
    #[error(transparent)]
    Core(#[from] ReviewError),
}

impl SessionError {
    /// Whether the error must stop a batch save instead of being counted
    /// as a single failed item
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::Inconsistent(_))
    }
}

impl From<SessionError> for ReviewError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Core(inner) => inner,
            SessionError::ItemNotFound(id) => ReviewError::ItemNotFound(id),
            SessionError::Http(e) => ReviewError::Network(e.to_string()),
            other => ReviewError::Other(other.to_string()),
        }
    }
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
