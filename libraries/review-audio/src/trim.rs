/// Sample-accurate buffer trimming
use crate::error::Result;
use review_core::{AudioSample, TrimBoundary};
use tracing::debug;

/// Copy frames `start..end` of every channel into a new sample
///
/// `end` is clamped to the clip length. When `end <= start` the original
/// sample is returned unchanged: degenerate detector output falls back to
/// "no trim" instead of failing. No fades are applied at the cut points.
pub fn trim(sample: &AudioSample, start: usize, end: usize) -> Result<AudioSample> {
    let end = end.min(sample.frames());
    if end <= start {
        debug!(start, end, "Degenerate trim range, keeping original");
        return Ok(sample.clone());
    }

    Ok(sample.map_channels(|channel| channel[start..end].to_vec())?)
}

/// Trim to a validated boundary
pub fn trim_to(sample: &AudioSample, boundary: TrimBoundary) -> Result<AudioSample> {
    trim(sample, boundary.start(), boundary.end())
}
