//! Silence boundary detection
//!
//! Finds where speech starts and stops in a clip by sliding a short window
//! over channel 0 and comparing its mean absolute amplitude with a fixed
//! threshold. The onset is backed off a little to keep attack transients,
//! the offset padded a little longer to keep trailing sound.

use review_core::AudioSample;
use tracing::debug;

/// Mean absolute amplitude a window must exceed to count as sound
pub const SILENCE_THRESHOLD: f32 = 0.02;

/// Analysis window length in milliseconds
pub const WINDOW_MS: u32 = 10;

/// How far the detected onset is moved back, in milliseconds
pub const ONSET_BACKOFF_MS: u32 = 100;

/// How far the detected offset is moved forward, in milliseconds
pub const OFFSET_PADDING_MS: u32 = 300;

/// Raw detector output
///
/// Both indices are clamped to the clip, but `start < end` is not
/// guaranteed: callers hand the pair to [`trim`](crate::trim) which treats
/// `end <= start` as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SilenceBounds {
    /// First frame to keep
    pub start: usize,
    /// One past the last frame to keep
    pub end: usize,
}

impl SilenceBounds {
    /// Whether the bounds describe a non-empty range
    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }
}

/// Silence detector with configurable threshold
#[derive(Debug, Clone, Copy)]
pub struct SilenceDetector {
    threshold: f32,
    window_ms: u32,
    onset_backoff_ms: u32,
    offset_padding_ms: u32,
}

impl Default for SilenceDetector {
    fn default() -> Self {
        Self {
            threshold: SILENCE_THRESHOLD,
            window_ms: WINDOW_MS,
            onset_backoff_ms: ONSET_BACKOFF_MS,
            offset_padding_ms: OFFSET_PADDING_MS,
        }
    }
}

impl SilenceDetector {
    /// Create a detector with the standard settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the amplitude threshold
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold.max(0.0);
        self
    }

    /// Get the amplitude threshold
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Detect the speech region of `sample`
    ///
    /// An all-silent clip (or one shorter than a single window) yields
    /// `start = 0, end = frames`.
    pub fn detect(&self, sample: &AudioSample) -> SilenceBounds {
        let total = sample.frames();
        let data = sample.channel(0).unwrap_or(&[]);
        let rate = sample.sample_rate();
        let window = rate.frames_for_ms(self.window_ms).max(1);

        let start = self
            .first_loud_window(data, window)
            .map_or(0, |onset| onset.saturating_sub(rate.frames_for_ms(self.onset_backoff_ms)));

        let end = self
            .last_loud_window(data, window)
            .map_or(total, |offset| {
                (offset + rate.frames_for_ms(self.offset_padding_ms)).min(total)
            });

        debug!(start, end, total, window, "Detected silence bounds");

        SilenceBounds { start, end }
    }

    /// Index of the first window `[i, i + window)` above the threshold
    fn first_loud_window(&self, data: &[f32], window: usize) -> Option<usize> {
        if data.len() < window {
            return None;
        }

        let limit = f64::from(self.threshold) * window as f64;
        let mut sum: f64 = data[..window].iter().map(|s| f64::from(s.abs())).sum();

        for i in 0..=(data.len() - window) {
            if i > 0 {
                sum += f64::from(data[i + window - 1].abs()) - f64::from(data[i - 1].abs());
            }
            if sum > limit {
                return Some(i);
            }
        }

        None
    }

    /// Index `i` of the last window `(i - window, i]` above the threshold
    fn last_loud_window(&self, data: &[f32], window: usize) -> Option<usize> {
        if data.len() < window {
            return None;
        }

        let limit = f64::from(self.threshold) * window as f64;
        let len = data.len();
        let mut sum: f64 = data[len - window..].iter().map(|s| f64::from(s.abs())).sum();

        for i in (window - 1..len).rev() {
            if i < len - 1 {
                // Window slid one frame towards the start
                sum += f64::from(data[i + 1 - window].abs()) - f64::from(data[i + 1].abs());
            }
            if sum > limit {
                return Some(i);
            }
        }

        None
    }
}

/// Detect speech bounds with the standard settings
pub fn detect_silence(sample: &AudioSample) -> SilenceBounds {
    SilenceDetector::new().detect(sample)
}
