/// Offline (non-realtime) rendering of an effect chain over a whole clip
use super::chain::EffectChain;
use crate::error::Result;
use review_core::AudioSample;
use tracing::debug;

/// Renders a complete `AudioSample` through an `EffectChain`
///
/// The output always has the input's length, rate and channel count. Each
/// channel is rendered from a fresh filter state.
pub struct OfflineRenderer {
    chain: EffectChain,
    prepared_rate: Option<u32>,
}

impl OfflineRenderer {
    /// Create a renderer around a chain
    pub fn new(chain: EffectChain) -> Self {
        Self {
            chain,
            prepared_rate: None,
        }
    }

    /// Access the rendered chain
    pub fn chain(&self) -> &EffectChain {
        &self.chain
    }

    /// Render `input` into a new sample
    pub fn render(&mut self, input: &AudioSample) -> Result<AudioSample> {
        let rate = input.sample_rate().as_hz();
        if self.prepared_rate != Some(rate) {
            self.chain.prepare(rate)?;
            self.prepared_rate = Some(rate);
        }

        let chain = &mut self.chain;
        let output = input.map_channels(|channel| {
            chain.reset();
            let mut rendered = channel.to_vec();
            chain.process(&mut rendered);
            rendered
        })?;
        self.chain.reset();

        debug!(
            frames = output.frames(),
            channels = output.channel_count(),
            effects = ?self.chain.names(),
            "Rendered clip offline"
        );

        Ok(output)
    }
}
