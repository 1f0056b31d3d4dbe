//! Loudness estimation and normalization for Clip Review
//!
//! This crate provides:
//! - A simplified gated-RMS loudness estimate (LUFS-style, channel 0)
//! - A normalizer that brings a clip to a fixed target with hard clipping
//! - An EBU R128 integrated-loudness reference via `ebur128`
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌───────────────┐
//! │ AudioSample │ ──► │   Analyzer   │ ──► │ estimate LUFS │
//! └─────────────┘     └──────────────┘     └───────────────┘
//!                            │
//!                            ▼
//!                     ┌──────────────┐     ┌───────────────┐
//!                     │  Normalizer  │ ──► │ AudioSample   │
//!                     └──────────────┘     └───────────────┘
//! ```
//!
//! The estimate is not a K-weighted measurement; use
//! [`reference_loudness`] when a standards-compliant figure is needed.
//!
//! # Example
//!
//! ```rust
//! use review_core::AudioSample;
//! use review_loudness::{measure_loudness, LoudnessNormalizer, TARGET_LUFS};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let samples: Vec<f32> = (0..44_100).map(|i| 0.05 * (i as f32 * 0.06).sin()).collect();
//! let clip = AudioSample::mono(samples, 44_100)?;
//!
//! let normalized = LoudnessNormalizer::new().normalize(&clip)?;
//! assert!((measure_loudness(&normalized) - TARGET_LUFS).abs() < 0.5);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![forbid(unsafe_code)]

mod analyzer;
mod error;
mod normalizer;
mod reference;

pub use analyzer::{
    measure_loudness, LoudnessSummary, ABSOLUTE_GATE_LUFS, BLOCK_MS, HOP_MS, RELATIVE_GATE_LU,
};
pub use error::{LoudnessError, Result};
pub use normalizer::{LoudnessNormalizer, TARGET_LUFS};
pub use reference::reference_loudness;
