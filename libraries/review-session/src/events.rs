//! Session Events
//!
//! Events let a front end follow long-running activities:
//! - Batch processing (per item start, success, failure)
//! - Batch save (guard, playback, controls, progress, outcome)

use review_core::ItemId;
use serde::{Deserialize, Serialize};

/// Events emitted while a batch is fetched and processed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProcessingEvent {
    /// Processing of `total` items started
    BatchStarted {
        /// Number of items in the batch
        total: usize,
    },

    /// An item is being fetched
    ItemStarted {
        /// Item id
        id: ItemId,
        /// Zero-based position in the batch
        index: usize,
    },

    /// An item was processed and stored
    ItemProcessed {
        /// Item id
        id: ItemId,
        /// Frames of the processed audio
        frames: usize,
    },

    /// An item failed and was skipped
    ItemFailed {
        /// Item id
        id: ItemId,
        /// Error description
        error: String,
    },

    /// All items were attempted
    BatchFinished {
        /// Items stored
        processed: usize,
        /// Items skipped
        failed: usize,
    },
}

/// Progress of a running save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveProgress {
    /// Title of the item that was just attempted
    pub current_title: String,
    /// Items attempted so far
    pub completed: usize,
    /// Items in the save
    pub total: usize,
    /// `completed / total` as a rounded percentage
    pub percent: u8,
}

/// Events emitted by the save state machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveEvent {
    /// Leaving the page must now be confirmed
    GuardInstalled,

    /// The leave-page guard was removed
    GuardLifted,

    /// Any active playback must pause
    PlaybackPaused,

    /// Per-item destructive controls were enabled or disabled
    ControlsEnabled(bool),

    /// One more item was attempted
    Progress(SaveProgress),

    /// Every item saved: the caller should reload its view
    RefreshRequested,
}
