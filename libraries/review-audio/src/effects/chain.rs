/// Effect chain for offline processing
///
/// Effects are processed in order over a single channel at a time.

/// Trait for audio effects that can be chained together
///
/// Effects hold per-channel filter state; the renderer calls `reset()`
/// before each channel so channels never bleed into each other.
pub trait AudioEffect: Send {
    /// Prepare the effect for a given sample rate
    ///
    /// Called once before rendering a clip.
    fn prepare(&mut self, sample_rate: u32) -> crate::Result<()>;

    /// Process one channel in-place
    fn process(&mut self, channel: &mut [f32]);

    /// Reset effect state (between channels and clips)
    fn reset(&mut self);

    /// Get effect name (for debugging)
    fn name(&self) -> &str;
}

/// Chain of audio effects processed in order
pub struct EffectChain {
    effects: Vec<Box<dyn AudioEffect>>,
}

impl EffectChain {
    /// Create a new empty effect chain
    pub fn new() -> Self {
        Self {
            effects: Vec::new(),
        }
    }

    /// Add an effect to the end of the chain
    pub fn add_effect(&mut self, effect: Box<dyn AudioEffect>) {
        self.effects.push(effect);
    }

    /// Prepare every effect for `sample_rate`
    pub fn prepare(&mut self, sample_rate: u32) -> crate::Result<()> {
        for effect in &mut self.effects {
            effect.prepare(sample_rate)?;
        }
        Ok(())
    }

    /// Process one channel through the entire chain
    pub fn process(&mut self, channel: &mut [f32]) {
        for effect in &mut self.effects {
            effect.process(channel);
        }
    }

    /// Reset all effects in the chain
    pub fn reset(&mut self) {
        for effect in &mut self.effects {
            effect.reset();
        }
    }

    /// Get number of effects in chain
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Check if chain is empty
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Names of the effects in processing order
    pub fn names(&self) -> Vec<&str> {
        self.effects.iter().map(|e| e.name()).collect()
    }
}

impl Default for EffectChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock effect for testing
    struct GainEffect {
        gain: f32,
        prepared_rate: Option<u32>,
    }

    impl AudioEffect for GainEffect {
        fn prepare(&mut self, sample_rate: u32) -> crate::Result<()> {
            self.prepared_rate = Some(sample_rate);
            Ok(())
        }

        fn process(&mut self, channel: &mut [f32]) {
            for sample in channel.iter_mut() {
                *sample *= self.gain;
            }
        }

        fn reset(&mut self) {
            // Nothing to reset for gain
        }

        fn name(&self) -> &str {
            "Gain"
        }
    }

    fn gain(gain: f32) -> Box<dyn AudioEffect> {
        Box::new(GainEffect {
            gain,
            prepared_rate: None,
        })
    }

    #[test]
    fn empty_chain() {
        let chain = EffectChain::new();
        assert_eq!(chain.len(), 0);
        assert!(chain.is_empty());
    }

    #[test]
    fn process_chain_in_order() {
        let mut chain = EffectChain::new();

        // Result: 0.5 * 2.0 = 1.0 (no change)
        chain.add_effect(gain(0.5));
        chain.add_effect(gain(2.0));
        chain.prepare(44_100).unwrap();

        let mut channel = vec![0.25; 64];
        chain.process(&mut channel);

        for sample in &channel {
            assert!((sample - 0.25).abs() < 0.0001);
        }
        assert_eq!(chain.names(), vec!["Gain", "Gain"]);
    }

    #[test]
    fn reset_chain() {
        let mut chain = EffectChain::new();
        chain.add_effect(gain(0.5));
        chain.reset(); // Should not panic
        assert_eq!(chain.len(), 1);
    }
}
