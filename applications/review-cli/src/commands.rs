//! Command implementations
use crate::config::CliConfig;
use crate::local::{sources_for_paths, DirectoryBackend};
use anyhow::{bail, Context, Result};
use review_audio::{detect_silence, SymphoniaDecoder};
use review_core::{DecodeHint, ProcessingOptions};
use review_loudness::{reference_loudness, LoudnessSummary};
use review_session::{
    Collaborators, HttpCollaborators, ProcessingEvent, ReviewSession, SaveEvent, SaveReport,
    SourceItem,
};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Options toggled off from the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionOverrides {
    pub no_trim: bool,
    pub no_noise: bool,
    pub no_loudness: bool,
}

impl OptionOverrides {
    /// Apply the overrides on top of configured options
    pub fn apply(self, base: ProcessingOptions) -> ProcessingOptions {
        ProcessingOptions {
            trim: base.trim && !self.no_trim,
            noise: base.noise && !self.no_noise,
            loudness: base.loudness && !self.no_loudness,
        }
    }
}

/// Loudness and silence analysis of one file
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub path: PathBuf,
    pub sample_rate: u32,
    pub channels: usize,
    pub frames: usize,
    pub summary: LoudnessSummary,
    /// EBU R128 integrated loudness, `None` for silent clips
    pub reference_lufs: Option<f64>,
    pub speech_start: usize,
    pub speech_end: usize,
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.path.display())?;
        writeln!(
            f,
            "  {} Hz, {} channel(s), {} frames",
            self.sample_rate, self.channels, self.frames
        )?;
        writeln!(f, "  {}", self.summary)?;
        match self.reference_lufs {
            Some(lufs) => writeln!(f, "  EBU R128: {:.1} LUFS", lufs)?,
            None => writeln!(f, "  EBU R128: n/a")?,
        }
        write!(f, "  Speech: frames {}..{}", self.speech_start, self.speech_end)
    }
}

/// Decode a file and measure it
pub fn analyze(path: &Path) -> Result<AnalysisReport> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let hint = DecodeHint::from_name(&path.to_string_lossy());
    let sample = SymphoniaDecoder::new()
        .decode(&bytes, &hint)
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    let reference_lufs = match reference_loudness(&sample) {
        Ok(lufs) => Some(lufs),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "No reference loudness");
            None
        }
    };
    let bounds = detect_silence(&sample);

    Ok(AnalysisReport {
        path: path.to_path_buf(),
        sample_rate: sample.sample_rate().as_hz(),
        channels: sample.channel_count(),
        frames: sample.frames(),
        summary: LoudnessSummary::of(&sample),
        reference_lufs,
        speech_start: bounds.start,
        speech_end: bounds.end,
    })
}

fn sources(files: &[PathBuf]) -> Result<Vec<SourceItem>> {
    if files.is_empty() {
        bail!("No input files given");
    }
    Ok(sources_for_paths(files))
}

fn log_processing(event: ProcessingEvent) {
    match event {
        ProcessingEvent::ItemFailed { id, error } => warn!(item = %id, error = %error, "Skipped"),
        ProcessingEvent::ItemProcessed { id, frames } => info!(item = %id, frames, "Processed"),
        _ => {}
    }
}

fn log_save(event: SaveEvent) {
    if let SaveEvent::Progress(progress) = event {
        info!(
            title = %progress.current_title,
            percent = progress.percent,
            "{}/{}",
            progress.completed,
            progress.total
        );
    }
}

async fn run_session(
    config: &CliConfig,
    collaborators: Collaborators,
    files: &[PathBuf],
    options: ProcessingOptions,
) -> Result<SaveReport> {
    let sources = sources(files)?;
    let mut session = ReviewSession::new(config.session(), collaborators);

    let mut emit = log_processing;
    let summary = session
        .process_batch_with(&sources, options, &mut emit)
        .await?;
    if summary.processed.is_empty() {
        bail!("None of the {} files could be processed", sources.len());
    }

    let report = session.save_all(log_save).await?;
    Ok(report)
}

/// Process files and write the results as WAV into `out_dir`
pub async fn process(
    config: &CliConfig,
    files: &[PathBuf],
    out_dir: &Path,
    options: ProcessingOptions,
) -> Result<SaveReport> {
    let backend = DirectoryBackend::new(out_dir);
    run_session(config, backend.collaborators(), files, options).await
}

/// Process files and upload them to the configured server
pub async fn save(config: &CliConfig, files: &[PathBuf], options: ProcessingOptions) -> Result<SaveReport> {
    config.validate()?;
    let mut http = HttpCollaborators::new(&config.server.base_url, config.timeout())?;
    if let Some(token) = &config.server.access_token {
        http = http.with_token(token.clone());
    }

    let remote = Collaborators::http(http);
    let collaborators = Collaborators {
        fetcher: Arc::new(crate::local::FileFetcher),
        ..remote
    };
    run_session(config, collaborators, files, options).await
}
