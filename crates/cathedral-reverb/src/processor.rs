//! Audio-side wrapper that reads shared parameters once per block.

use crate::engine::ReverbEngine;
use crate::params::ReverbParams;
use crate::shared::SharedParams;

/// Couples a [`ReverbEngine`] with a [`SharedParams`] handle.
///
/// Each call to [`process`](Self::process) snapshots the shared parameters,
/// runs the engine on that snapshot and publishes the resulting CPU ratio
/// back to the shared store.
///
/// ```rust
/// use cathedral_reverb::{ReverbParam, ReverbProcessor, SharedParams};
///
/// let shared = SharedParams::new();
/// let mut processor = ReverbProcessor::new(shared.clone(), 48000.0, 128);
///
/// shared.set(ReverbParam::Bypass, 1.0);
/// let input = vec![0.5f32; 128];
/// let mut l = vec![0.0f32; 128];
/// let mut r = vec![0.0f32; 128];
/// processor.process(&[&input], &mut [&mut l, &mut r]);
/// assert_eq!(l, input);
/// ```
#[derive(Debug)]
pub struct ReverbProcessor {
    engine: ReverbEngine,
    shared: SharedParams,
}

impl ReverbProcessor {
    /// Creates a processor prepared for `sample_rate` and `max_block`.
    pub fn new(shared: SharedParams, sample_rate: f32, max_block: usize) -> Self {
        Self {
            engine: ReverbEngine::new(sample_rate, max_block),
            shared,
        }
    }

    /// Re-prepares the engine. Must not run concurrently with processing.
    pub fn prepare(&mut self, sample_rate: f32, max_block: usize) {
        self.engine.prepare(sample_rate, max_block);
    }

    /// Clears the engine's signal state.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Processes one block from separate input and output buffers.
    pub fn process(&mut self, input: &[&[f32]], output: &mut [&mut [f32]]) -> ReverbParams {
        let params = self.shared.snapshot();
        self.engine.process(&params, input, output);
        self.publish(&params);
        params
    }

    /// Processes one block in place; the first `num_inputs` channels hold
    /// the input.
    pub fn process_buffer(&mut self, channels: &mut [&mut [f32]], num_inputs: usize) -> ReverbParams {
        let params = self.shared.snapshot();
        self.engine.process_buffer(&params, channels, num_inputs);
        self.publish(&params);
        params
    }

    fn publish(&self, params: &ReverbParams) {
        if !params.bypass {
            self.shared.publish_cpu_usage(self.engine.cpu_usage());
        }
    }

    /// The wrapped engine.
    pub fn engine(&self) -> &ReverbEngine {
        &self.engine
    }

    /// The shared parameter handle.
    pub fn shared(&self) -> &SharedParams {
        &self.shared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ReverbParam;

    #[test]
    fn picks_up_parameter_changes_between_blocks() {
        let shared = SharedParams::new();
        let mut processor = ReverbProcessor::new(shared.clone(), 48000.0, 64);
        let input = vec![0.0; 64];
        let mut l = vec![0.0; 64];
        let mut r = vec![0.0; 64];

        let used = processor.process(&[&input], &mut [&mut l, &mut r]);
        assert_eq!(used.diffusion, 10.0);

        shared.set(ReverbParam::Diffusion, 0.0);
        let used = processor.process(&[&input], &mut [&mut l, &mut r]);
        assert_eq!(used.diffusion, 0.0);
        assert!((processor.engine().allpass_chain().gain() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn publishes_cpu_usage() {
        let shared = SharedParams::new();
        let mut processor = ReverbProcessor::new(shared.clone(), 48000.0, 512);
        let mut l = vec![0.1; 512];
        let mut r = vec![0.1; 512];
        processor.process_buffer(&mut [&mut l, &mut r], 2);
        assert_eq!(shared.cpu_usage(), processor.engine().cpu_usage());
        assert!(shared.cpu_usage().is_finite() && shared.cpu_usage() >= 0.0);
    }

    #[test]
    fn prepare_resets_state() {
        let shared = SharedParams::new();
        shared.set(ReverbParam::PreDelay, 0.0);
        let mut processor = ReverbProcessor::new(shared, 48000.0, 64);
        let mut l = vec![1.0; 64];
        let mut r = vec![1.0; 64];
        processor.process_buffer(&mut [&mut l, &mut r], 2);
        assert!(!processor.engine().is_silent());

        processor.prepare(44100.0, 32);
        assert!(processor.engine().is_silent());
        assert_eq!(processor.engine().sample_rate(), 44100.0);
        assert_eq!(processor.engine().max_block_size(), 32);
    }
}
