//! Processing pipeline
//!
//! Stages always run in the same order, each optional:
//! original → trim → noise filter → loudness normalization. Every run
//! starts from the original, so toggling an option never compounds
//! earlier processing.

use crate::error::{Result, SessionError};
use review_audio::{trim_to, NoiseFilter, SilenceDetector, SymphoniaDecoder};
use review_core::{AudioDecoder, AudioSample, DecodeHint, ProcessingOptions, TrimBoundary};
use review_loudness::LoudnessNormalizer;
use tracing::debug;

/// Output of one processing run
#[derive(Debug, Clone)]
pub struct ProcessedClip {
    /// Processed audio
    pub sample: AudioSample,
    /// Boundary the run used, in frames of the original
    pub boundary: TrimBoundary,
    /// Options the run used
    pub options: ProcessingOptions,
}

/// Stages and decoder reused across a whole session
pub struct ProcessingContext {
    decoder: Box<dyn AudioDecoder>,
    detector: SilenceDetector,
    noise: NoiseFilter,
    normalizer: LoudnessNormalizer,
}

impl ProcessingContext {
    /// Context with the Symphonia decoder and default stage settings
    pub fn new() -> Self {
        Self::with_decoder(Box::new(SymphoniaDecoder::new()))
    }

    /// Context with a custom decoder
    pub fn with_decoder(decoder: Box<dyn AudioDecoder>) -> Self {
        Self {
            decoder,
            detector: SilenceDetector::new(),
            noise: NoiseFilter::new(),
            normalizer: LoudnessNormalizer::new(),
        }
    }

    /// Replace the loudness normalizer
    pub fn with_normalizer(mut self, normalizer: LoudnessNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Replace the noise filter's pass band
    pub fn with_noise_band(mut self, highpass_hz: f32, lowpass_hz: f32) -> Self {
        self.noise = NoiseFilter::with_band(highpass_hz, lowpass_hz);
        self
    }

    /// Loudness normalizer used by the last stage and by save
    pub fn normalizer(&self) -> LoudnessNormalizer {
        self.normalizer
    }

    /// Decode a fetched file
    pub fn decode(&mut self, bytes: &[u8], hint: &DecodeHint) -> Result<AudioSample> {
        Ok(self.decoder.decode_bytes(bytes, hint)?)
    }

    /// Detect the speech boundary of `original`
    ///
    /// Degenerate detector output falls back to the full clip.
    pub fn detect_boundary(&self, original: &AudioSample) -> TrimBoundary {
        let total = original.frames();
        let bounds = self.detector.detect(original);
        match TrimBoundary::new(bounds.start, bounds.end, total) {
            Ok(boundary) => boundary,
            Err(_) => {
                debug!(
                    start = bounds.start,
                    end = bounds.end,
                    frames = total,
                    "Degenerate silence bounds, keeping full clip"
                );
                TrimBoundary::full(total)
            }
        }
    }

    /// First run over a freshly decoded clip
    ///
    /// Detects the boundary only when trimming is enabled.
    pub fn run(&mut self, original: &AudioSample, options: ProcessingOptions) -> Result<ProcessedClip> {
        let boundary = if options.trim {
            self.detect_boundary(original)
        } else {
            TrimBoundary::full(original.frames())
        };
        self.run_with(original, options, boundary)
    }

    /// Run with a known boundary
    pub fn run_with(
        &mut self,
        original: &AudioSample,
        options: ProcessingOptions,
        boundary: TrimBoundary,
    ) -> Result<ProcessedClip> {
        let sample = run_stages(&mut self.noise, &self.normalizer, original, options, boundary)?;
        Ok(ProcessedClip {
            sample,
            boundary,
            options,
        })
    }

    /// Rebuild processed audio from `original` with this context's stage
    /// settings
    ///
    /// Runs a fresh copy of the noise filter, so the result depends only on
    /// the arguments and the configured band and loudness target.
    pub fn reprocess(
        &self,
        original: &AudioSample,
        options: ProcessingOptions,
        boundary: TrimBoundary,
    ) -> Result<AudioSample> {
        let (highpass_hz, lowpass_hz) = self.noise.band();
        run_stages(
            &mut NoiseFilter::with_band(highpass_hz, lowpass_hz),
            &self.normalizer,
            original,
            options,
            boundary,
        )
    }
}

impl Default for ProcessingContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Rebuild processed audio from `original` with the default stage settings
///
/// A pure function of its inputs: the same original, options and boundary
/// always give the same samples. A context with a custom band or target
/// must use [`ProcessingContext::reprocess`] instead.
pub fn reprocess(
    original: &AudioSample,
    options: ProcessingOptions,
    boundary: TrimBoundary,
) -> Result<AudioSample> {
    run_stages(
        &mut NoiseFilter::new(),
        &LoudnessNormalizer::new(),
        original,
        options,
        boundary,
    )
}

fn run_stages(
    noise: &mut NoiseFilter,
    normalizer: &LoudnessNormalizer,
    original: &AudioSample,
    options: ProcessingOptions,
    boundary: TrimBoundary,
) -> Result<AudioSample> {
    let mut current = original.clone();

    if options.trim {
        if !boundary.fits(original.frames()) {
            return Err(SessionError::InvalidBoundary(format!(
                "{}..{} exceeds {} frames",
                boundary.start(),
                boundary.end(),
                original.frames()
            )));
        }
        current = trim_to(&current, boundary)?;
        debug!(frames = current.frames(), "Trimmed");
    }

    if options.noise {
        current = noise.apply(&current)?;
        debug!(frames = current.frames(), "Filtered noise");
    }

    if options.loudness {
        current = normalizer.normalize(&current)?;
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1 s silence, 1 s tone, 1 s silence at 8 kHz
    fn padded_tone() -> AudioSample {
        let mut samples = vec![0.0_f32; 24_000];
        for (i, s) in samples[8_000..16_000].iter_mut().enumerate() {
            *s = 0.05 * (2.0 * std::f32::consts::PI * 300.0 * i as f32 / 8_000.0).sin();
        }
        AudioSample::mono(samples, 8_000).unwrap()
    }

    #[test]
    fn no_options_is_identity() {
        let original = padded_tone();
        let out = reprocess(&original, ProcessingOptions::NONE, TrimBoundary::full(24_000)).unwrap();
        assert!(out.shares_storage(&original));
    }

    #[test]
    fn trim_uses_boundary() {
        let original = padded_tone();
        let boundary = TrimBoundary::new(1_000, 5_000, 24_000).unwrap();
        let options = ProcessingOptions {
            trim: true,
            noise: false,
            loudness: false,
        };
        let out = reprocess(&original, options, boundary).unwrap();
        assert_eq!(out.frames(), 4_000);
    }

    #[test]
    fn boundary_past_end_is_rejected() {
        let original = padded_tone();
        let boundary = TrimBoundary::full(30_000);
        let result = reprocess(&original, ProcessingOptions::ALL, boundary);
        assert!(matches!(result, Err(SessionError::InvalidBoundary(_))));
    }

    #[test]
    fn detection_runs_only_with_trim() {
        let original = padded_tone();
        let mut context = ProcessingContext::new();

        let trimmed = context.run(&original, ProcessingOptions::ALL).unwrap();
        assert!(trimmed.boundary.start() > 0);
        assert!(trimmed.boundary.len() < 24_000);
        assert_eq!(trimmed.sample.frames(), trimmed.boundary.len());

        let untrimmed = context
            .run(
                &original,
                ProcessingOptions {
                    trim: false,
                    ..ProcessingOptions::ALL
                },
            )
            .unwrap();
        assert!(untrimmed.boundary.is_full(24_000));
        assert_eq!(untrimmed.sample.frames(), 24_000);
    }

    #[test]
    fn silent_clip_keeps_full_boundary() {
        let silent = AudioSample::mono(vec![0.0; 8_000], 8_000).unwrap();
        let context = ProcessingContext::new();
        assert!(context.detect_boundary(&silent).is_full(8_000));
    }

    #[test]
    fn reprocess_follows_context_settings() {
        let original = padded_tone();
        let mut context = ProcessingContext::new()
            .with_normalizer(LoudnessNormalizer::with_target(-30.0))
            .with_noise_band(200.0, 3_000.0);
        let clip = context.run(&original, ProcessingOptions::ALL).unwrap();

        let again = context.reprocess(&original, clip.options, clip.boundary).unwrap();
        assert_eq!(clip.sample, again);

        let defaults = reprocess(&original, clip.options, clip.boundary).unwrap();
        assert_ne!(clip.sample, defaults);
    }

    #[test]
    fn context_matches_pure_reprocess() {
        let original = padded_tone();
        let mut context = ProcessingContext::new();
        let clip = context.run(&original, ProcessingOptions::ALL).unwrap();
        let again = reprocess(&original, clip.options, clip.boundary).unwrap();
        assert_eq!(clip.sample, again);
    }
}
