/// CLI configuration
use anyhow::{bail, Context, Result};
use review_core::ProcessingOptions;
use review_session::SessionConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Default configuration file, read from the working directory
pub const CONFIG_FILE: &str = "review.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_processing")]
    pub processing: ProcessingSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProcessingSettings {
    #[serde(default = "default_enabled")]
    pub trim: bool,

    #[serde(default = "default_enabled")]
    pub noise: bool,

    #[serde(default = "default_enabled")]
    pub loudness: bool,

    #[serde(default = "default_failure_pause_ms")]
    pub failure_pause_ms: u64,

    #[serde(default = "default_mp3_bitrate_kbps")]
    pub mp3_bitrate_kbps: u32,
}

impl CliConfig {
    /// Load configuration from a file and the environment
    ///
    /// `path` must exist when given; otherwise `review.toml` is read if
    /// present. Variables such as `REVIEW_SERVER__BASE_URL` override both.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()).required(true));
            }
            None => {
                let default_path = PathBuf::from(CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("REVIEW")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build().context("Failed to read configuration")?;
        config
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.server.base_url)
            .with_context(|| format!("Invalid server.base_url {:?}", self.server.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("server.base_url must start with http:// or https://");
        }
        if self.server.timeout_secs == 0 {
            bail!("server.timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.server.timeout_secs)
    }

    /// Options from the `[processing]` section
    pub fn options(&self) -> ProcessingOptions {
        ProcessingOptions {
            trim: self.processing.trim,
            noise: self.processing.noise,
            loudness: self.processing.loudness,
        }
    }

    /// Session settings derived from this configuration
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            failure_pause_ms: self.processing.failure_pause_ms,
            mp3_bitrate_kbps: self.processing.mp3_bitrate_kbps,
            default_options: self.options(),
        }
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        base_url: default_base_url(),
        timeout_secs: default_timeout_secs(),
        access_token: None,
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_processing() -> ProcessingSettings {
    ProcessingSettings {
        trim: default_enabled(),
        noise: default_enabled(),
        loudness: default_enabled(),
        failure_pause_ms: default_failure_pause_ms(),
        mp3_bitrate_kbps: default_mp3_bitrate_kbps(),
    }
}

fn default_enabled() -> bool {
    true
}

fn default_failure_pause_ms() -> u64 {
    SessionConfig::default().failure_pause_ms
}

fn default_mp3_bitrate_kbps() -> u32 {
    SessionConfig::default().mp3_bitrate_kbps
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            processing: default_processing(),
        }
    }
}
