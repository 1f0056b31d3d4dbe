//! Clip Review Session
//!
//! Per-item review state for a batch of recordings, and the commands that
//! drive it.
//!
//! This crate provides:
//! - A batch store with a single activity gate (processing, saving, deleting)
//! - The processing pipeline (trim → noise filter → loudness) and its
//!   orchestration over a batch
//! - A pointer-driven trim boundary editor
//! - The batch save state machine with progress and partial-failure reporting
//! - Collaborator traits for fetch, upload, rename and delete, with a REST
//!   implementation over reqwest
//!
//! # Architecture
//!
//! ```text
//! SourceItem ──► fetch ──► decode ──► ProcessingContext ──► ReviewItem ──► BatchStore
//!                                          ▲                                  │
//!                     option change ───────┤                                  ▼
//!                     boundary commit ─────┘                       save: encode ──► upload
//! ```
//!
//! # Example
//!
//! ```ignore
//! use review_session::{Collaborators, HttpCollaborators, ReviewSession, SessionConfig};
//! use std::time::Duration;
//!
//! let http = HttpCollaborators::new("https://review.example.com", Duration::from_secs(30))?;
//! let mut session = ReviewSession::new(SessionConfig::default(), Collaborators::http(http));
//!
//! session.process_batch(&sources, |event| println!("{event:?}")).await?;
//! let report = session.save_all(|event| println!("{event:?}")).await?;
//! println!("{} saved, {} failed", report.succeeded_count(), report.failed_count());
//! ```

mod collaborators;
mod config;
pub mod editor;
mod error;
mod events;
mod http;
pub mod orchestrator;
pub mod pipeline;
pub mod save;
mod session;
pub mod store;
mod types;

pub use collaborators::{
    AudioFetcher, DeletionService, TitleService, UploadOutcome, UploadRequest, Uploader,
};
pub use config::SessionConfig;
pub use editor::{BoundaryEditor, ContainerRect, GlobalListeners, Marker, PointerInput};
pub use error::{Result, SessionError};
pub use events::{ProcessingEvent, SaveEvent, SaveProgress};
pub use http::HttpCollaborators;
pub use orchestrator::BatchSummary;
pub use pipeline::{reprocess, ProcessedClip, ProcessingContext};
pub use save::{SaveReport, SaveState};
pub use session::{Collaborators, ReviewSession};
pub use store::{Activity, ActivityGuard, BatchStore};
pub use types::{ReviewItem, SourceItem};
