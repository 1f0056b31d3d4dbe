/// Single biquad filter stage backed by the `biquad` crate
use super::chain::AudioEffect;
use crate::error::{AudioError, Result};
use biquad::{Biquad, Coefficients, DirectForm2Transposed, Hertz, Type, Q_BUTTERWORTH_F32};

/// Fraction of the sample rate a cutoff is clamped to, away from Nyquist
const MAX_CUTOFF_RATIO: f32 = 0.45;

/// Filter response of a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Passes content above the cutoff
    HighPass,
    /// Passes content below the cutoff
    LowPass,
}

impl FilterKind {
    fn response(self) -> Type<f32> {
        match self {
            Self::HighPass => Type::HighPass,
            Self::LowPass => Type::LowPass,
        }
    }
}

/// One second-order (two-pole) IIR section with Butterworth Q
pub struct BiquadStage {
    kind: FilterKind,
    cutoff_hz: f32,
    filter: Option<DirectForm2Transposed<f32>>,
}

impl BiquadStage {
    /// Create an unprepared stage
    pub fn new(kind: FilterKind, cutoff_hz: f32) -> Self {
        Self {
            kind,
            cutoff_hz,
            filter: None,
        }
    }

    /// Highpass stage
    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterKind::HighPass, cutoff_hz)
    }

    /// Lowpass stage
    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterKind::LowPass, cutoff_hz)
    }

    /// Configured cutoff in Hz
    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz
    }

    /// Cutoff actually used at `sample_rate`
    pub fn effective_cutoff(&self, sample_rate: u32) -> f32 {
        self.cutoff_hz.min(sample_rate as f32 * MAX_CUTOFF_RATIO)
    }
}

impl AudioEffect for BiquadStage {
    fn prepare(&mut self, sample_rate: u32) -> Result<()> {
        if sample_rate == 0 {
            return Err(AudioError::Filter("sample rate must be non-zero".to_string()));
        }

        let fs = Hertz::<f32>::from_hz(sample_rate as f32)
            .map_err(|e| AudioError::Filter(format!("{:?}", e)))?;
        let f0 = Hertz::<f32>::from_hz(self.effective_cutoff(sample_rate))
            .map_err(|e| AudioError::Filter(format!("{:?}", e)))?;

        let coeffs = Coefficients::<f32>::from_params(self.kind.response(), fs, f0, Q_BUTTERWORTH_F32)
            .map_err(|e| AudioError::Filter(format!("{:?}", e)))?;

        self.filter = Some(DirectForm2Transposed::<f32>::new(coeffs));
        Ok(())
    }

    fn process(&mut self, channel: &mut [f32]) {
        // Unprepared stages pass audio through
        let Some(filter) = self.filter.as_mut() else {
            return;
        };

        for sample in channel.iter_mut() {
            *sample = filter.run(*sample);
        }
    }

    fn reset(&mut self) {
        if let Some(filter) = self.filter.as_mut() {
            filter.reset_state();
        }
    }

    fn name(&self) -> &str {
        match self.kind {
            FilterKind::HighPass => "HighPass",
            FilterKind::LowPass => "LowPass",
        }
    }
}
