//! Batch save state machine
//!
//! ```text
//! Idle ──► Saving ──► Success
//!             │  └──► PartialFailure
//!             └─────► Aborted (fatal error)
//! ```
//!
//! Any terminal state may start a new save. Side effects for the front end
//! (leave-page guard, playback, per-item controls, progress) are reported
//! as [`SaveEvent`]s.

use crate::error::{Result, SessionError};
use crate::events::{SaveEvent, SaveProgress};
use crate::store::Activity;
use review_audio::{encode_wav, EncodedAudio, Mp3Capability, Mp3Encoder};
use review_core::{AudioSample, ItemId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// An item the backend accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedItem {
    pub id: ItemId,
    /// Canonical title reported by the backend, or the local one
    pub title: String,
}

/// An item that could not be saved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedSave {
    pub id: ItemId,
    pub reason: String,
}

/// Outcome of one save run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveReport {
    pub succeeded: Vec<SavedItem>,
    pub failed: Vec<FailedSave>,
}

impl SaveReport {
    pub fn succeeded_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// True when nothing failed
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Save state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveState {
    Idle,
    Saving { completed: usize, total: usize },
    Success(SaveReport),
    PartialFailure(SaveReport),
    Aborted(String),
}

/// Tracks one save run and emits its front-end events
#[derive(Debug)]
pub struct SaveStateMachine {
    state: SaveState,
}

impl SaveStateMachine {
    pub fn new() -> Self {
        Self {
            state: SaveState::Idle,
        }
    }

    pub fn state(&self) -> &SaveState {
        &self.state
    }

    pub fn is_saving(&self) -> bool {
        matches!(self.state, SaveState::Saving { .. })
    }

    /// Enter `Saving` for `total` items
    pub fn begin<F: FnMut(SaveEvent)>(&mut self, total: usize, emit: &mut F) -> Result<()> {
        if self.is_saving() {
            return Err(SessionError::Busy(Activity::Saving));
        }
        self.state = SaveState::Saving {
            completed: 0,
            total,
        };
        emit(SaveEvent::GuardInstalled);
        emit(SaveEvent::PlaybackPaused);
        emit(SaveEvent::ControlsEnabled(false));
        Ok(())
    }

    /// Count one attempted item and report progress
    pub fn record<F: FnMut(SaveEvent)>(&mut self, title: &str, emit: &mut F) {
        if let SaveState::Saving { completed, total } = &mut self.state {
            *completed += 1;
            emit(SaveEvent::Progress(SaveProgress {
                current_title: title.to_string(),
                completed: *completed,
                total: *total,
                percent: percent(*completed, *total),
            }));
        }
    }

    /// Enter the terminal state matching `report`
    pub fn finish<F: FnMut(SaveEvent)>(&mut self, report: SaveReport, emit: &mut F) {
        if report.is_success() {
            emit(SaveEvent::GuardLifted);
            emit(SaveEvent::RefreshRequested);
            self.state = SaveState::Success(report);
        } else {
            emit(SaveEvent::GuardLifted);
            emit(SaveEvent::ControlsEnabled(true));
            self.state = SaveState::PartialFailure(report);
        }
    }

    /// Stop after a fatal error
    pub fn abort<F: FnMut(SaveEvent)>(&mut self, reason: &str, emit: &mut F) {
        emit(SaveEvent::GuardLifted);
        emit(SaveEvent::ControlsEnabled(true));
        self.state = SaveState::Aborted(reason.to_string());
    }
}

impl Default for SaveStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

fn percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((completed as f64 / total as f64) * 100.0).round().min(100.0) as u8
}

/// Picks MP3 when a capability is configured, WAV otherwise
#[derive(Clone, Default)]
pub struct ClipEncoder {
    mp3: Option<Mp3Encoder>,
}

impl ClipEncoder {
    /// WAV only
    pub fn wav() -> Self {
        Self { mp3: None }
    }

    /// MP3 through `capability` at `bitrate_kbps`
    pub fn mp3(capability: Arc<dyn Mp3Capability>, bitrate_kbps: u32) -> Self {
        Self {
            mp3: Some(Mp3Encoder::new(capability).with_bitrate(bitrate_kbps)),
        }
    }

    pub fn uses_mp3(&self) -> bool {
        self.mp3.is_some()
    }

    /// Encode `sample`, falling back to WAV if the MP3 capability fails
    pub fn encode(&self, sample: &AudioSample) -> Result<EncodedAudio> {
        if let Some(mp3) = &self.mp3 {
            match mp3.encode(sample) {
                Ok(encoded) => return Ok(encoded),
                Err(e) => warn!(error = %e, "MP3 encoding failed, falling back to WAV"),
            }
        }
        Ok(encode_wav(sample)?)
    }
}
