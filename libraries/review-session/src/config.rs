//! Session configuration

use review_core::ProcessingOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for a review session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Pause after a failed item before the batch continues
    #[serde(default = "default_failure_pause_ms")]
    pub failure_pause_ms: u64,

    /// Bitrate handed to the MP3 capability, when one is configured
    #[serde(default = "default_mp3_bitrate_kbps")]
    pub mp3_bitrate_kbps: u32,

    /// Options applied to newly processed items
    #[serde(default)]
    pub default_options: ProcessingOptions,
}

fn default_failure_pause_ms() -> u64 {
    750
}

fn default_mp3_bitrate_kbps() -> u32 {
    review_audio::encode::MP3_BITRATE_KBPS
}

impl SessionConfig {
    /// Pause after a failed item
    pub fn failure_pause(&self) -> Duration {
        Duration::from_millis(self.failure_pause_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            failure_pause_ms: default_failure_pause_ms(),
            mp3_bitrate_kbps: default_mp3_bitrate_kbps(),
            default_options: ProcessingOptions::default(),
        }
    }
}
