//! Gated loudness estimate
//!
//! A simplified take on BS.1770 integrated loudness: mean-square power of
//! overlapping blocks on channel 0, an absolute gate, then a relative gate
//! against the mean of the surviving block loudness values. There is no
//! K-weighting pre-filter, so results differ from a compliant meter on
//! bass-heavy material.

use review_core::AudioSample;
use std::fmt;
use tracing::debug;

/// Block length in milliseconds
pub const BLOCK_MS: u32 = 400;

/// Hop between block starts in milliseconds
pub const HOP_MS: u32 = 100;

/// Blocks at or below this loudness are ignored
pub const ABSOLUTE_GATE_LUFS: f64 = -70.0;

/// Distance below the absolute-gated mean for the relative gate
pub const RELATIVE_GATE_LU: f64 = 10.0;

const LOUDNESS_OFFSET: f64 = -0.691;

/// Estimate the loudness of `sample` in LUFS
///
/// Returns [`ABSOLUTE_GATE_LUFS`] when no block passes the absolute gate,
/// including clips shorter than one block.
pub fn measure_loudness(sample: &AudioSample) -> f64 {
    let data = sample.channel(0).unwrap_or(&[]);
    let rate = sample.sample_rate();
    let block = rate.frames_for_ms(BLOCK_MS).max(1);
    let hop = rate.frames_for_ms(HOP_MS).max(1);

    let mut gated = Vec::new();
    let mut offset = 0;
    while offset + block <= data.len() {
        let loudness = block_loudness(&data[offset..offset + block]);
        if loudness > ABSOLUTE_GATE_LUFS {
            gated.push(loudness);
        }
        offset += hop;
    }

    if gated.is_empty() {
        debug!(frames = data.len(), "No block above the absolute gate");
        return ABSOLUTE_GATE_LUFS;
    }

    let absolute_mean = mean(&gated);
    let threshold = absolute_mean - RELATIVE_GATE_LU;
    let survivors: Vec<f64> = gated.iter().copied().filter(|&l| l >= threshold).collect();

    if survivors.is_empty() {
        return absolute_mean;
    }
    mean(&survivors)
}

fn block_loudness(block: &[f32]) -> f64 {
    let sum: f64 = block.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
    let mean_square = sum / block.len() as f64;
    LOUDNESS_OFFSET + 10.0 * mean_square.log10()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Loudness figures for logging and reports
#[derive(Debug, Clone, PartialEq)]
pub struct LoudnessSummary {
    /// Gated estimate in LUFS (see [`measure_loudness`])
    pub estimate_lufs: f64,

    /// Sample peak across all channels in dBFS
    pub sample_peak_dbfs: f64,

    /// Clip duration in seconds
    pub duration_seconds: f64,
}

impl LoudnessSummary {
    /// Summarize `sample`
    pub fn of(sample: &AudioSample) -> Self {
        let peak = sample
            .channels()
            .flatten()
            .fold(0.0_f32, |acc, &s| acc.max(s.abs()));
        let sample_peak_dbfs = if peak > 0.0 {
            20.0 * f64::from(peak).log10()
        } else {
            f64::NEG_INFINITY
        };

        Self {
            estimate_lufs: measure_loudness(sample),
            sample_peak_dbfs,
            duration_seconds: sample.duration_secs(),
        }
    }
}

impl fmt::Display for LoudnessSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Loudness: {:.1} LUFS, Sample Peak: {:.1} dBFS, Duration: {:.2} s",
            self.estimate_lufs, self.sample_peak_dbfs, self.duration_seconds
        )
    }
}
