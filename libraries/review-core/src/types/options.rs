/// Per-item processing options and trim boundaries
use serde::{Deserialize, Serialize};

use crate::error::{Result, ReviewError};

/// Which pipeline stages run for an item
///
/// Captured by value next to every processed result, so later edits to the
/// batch defaults never alter a completed entry without reprocessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessingOptions {
    /// Trim leading/trailing silence
    #[serde(rename = "enableTrim")]
    pub trim: bool,
    /// Apply the speech-band noise filter
    #[serde(rename = "enableNoise")]
    pub noise: bool,
    /// Normalize loudness to the target level
    #[serde(rename = "enableLoudness")]
    pub loudness: bool,
}

impl ProcessingOptions {
    /// All stages enabled
    pub const ALL: Self = Self {
        trim: true,
        noise: true,
        loudness: true,
    };

    /// All stages disabled (processed output equals the original)
    pub const NONE: Self = Self {
        trim: false,
        noise: false,
        loudness: false,
    };
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self::ALL
    }
}

/// Sample range kept from a clip
///
/// Invariant: `start < end <= total_frames` of the clip it was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTrimBoundary")]
pub struct TrimBoundary {
    start: usize,
    end: usize,
}

/// Unchecked wire form of [`TrimBoundary`]
#[derive(Deserialize)]
struct RawTrimBoundary {
    start: usize,
    end: usize,
}

impl TryFrom<RawTrimBoundary> for TrimBoundary {
    type Error = ReviewError;

    fn try_from(raw: RawTrimBoundary) -> Result<Self> {
        // 0..0 is what `full` gives for an empty clip
        if raw.start < raw.end || (raw.start == 0 && raw.end == 0) {
            Ok(Self {
                start: raw.start,
                end: raw.end,
            })
        } else {
            Err(ReviewError::invalid_input(format!(
                "invalid trim boundary {}..{}",
                raw.start, raw.end
            )))
        }
    }
}

impl TrimBoundary {
    /// Create a validated boundary for a clip of `total_frames`
    pub fn new(start: usize, end: usize, total_frames: usize) -> Result<Self> {
        if start >= end || end > total_frames {
            return Err(ReviewError::invalid_input(format!(
                "invalid trim boundary {}..{} for {} frames",
                start, end, total_frames
            )));
        }
        Ok(Self { start, end })
    }

    /// Boundary spanning the whole clip
    ///
    /// For an empty clip this is `0..0`, the one boundary that is not
    /// strictly increasing.
    pub fn full(total_frames: usize) -> Self {
        Self {
            start: 0,
            end: total_frames,
        }
    }

    /// First kept frame
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the last kept frame
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of kept frames
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for the empty `0..0` boundary of an empty clip
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Whether the boundary covers all `total_frames`
    pub fn is_full(&self, total_frames: usize) -> bool {
        self.start == 0 && self.end == total_frames
    }

    /// Whether the boundary is valid for a clip of `total_frames`
    pub fn fits(&self, total_frames: usize) -> bool {
        self.end <= total_frames
    }
}
