//! Clip Review Core
//!
//! Platform-agnostic core types, traits, and error handling for the clip
//! review pipeline.
//!
//! This crate provides the foundational building blocks shared by the audio,
//! loudness, and session crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `AudioSample`, `ProcessingOptions`, `TrimBoundary`, ids
//! - **Core Traits**: `AudioDecoder`
//! - **Error Handling**: Unified `ReviewError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use review_core::{AudioSample, ProcessingOptions, TrimBoundary};
//!
//! // One second of mono silence at 44.1 kHz
//! let sample = AudioSample::mono(vec![0.0; 44_100], 44_100).unwrap();
//! assert_eq!(sample.frames(), 44_100);
//!
//! let boundary = TrimBoundary::full(sample.frames());
//! assert_eq!(boundary.len(), 44_100);
//!
//! let options = ProcessingOptions::default();
//! assert!(options.trim && options.noise && options.loudness);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, ReviewError};
pub use traits::{AudioDecoder, DecodeHint};
pub use types::{AudioSample, GroupKey, ItemId, ProcessingOptions, SampleRate, TrimBoundary};
