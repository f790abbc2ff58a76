//! Eight allpass stages in series for diffusion.

use crate::topology::{ALLPASS_MAX_SECONDS, ALLPASS_TUNINGS, NUM_ALLPASSES, capacity_for, scale_to_rate};
use cathedral_core::{AllpassFilter, ProcessPath, map_range};

/// Allpass gain for a diffusion amount: 0 maps to 0.3, 20 maps to 0.7.
pub fn diffusion_gain(diffusion: f32) -> f32 {
    map_range(diffusion.clamp(0.0, 20.0), 0.0, 20.0, 0.3, 0.7)
}

/// The series allpass section. Stage `i` feeds stage `i + 1`.
#[derive(Debug, Clone)]
pub struct AllpassChain {
    stages: [AllpassFilter; NUM_ALLPASSES],
}

impl AllpassChain {
    /// Allocates all stages for `sample_rate` with silent state.
    pub fn new(sample_rate: f32) -> Self {
        let capacity = capacity_for(ALLPASS_MAX_SECONDS, sample_rate);
        Self {
            stages: core::array::from_fn(|i| {
                let mut stage = AllpassFilter::new(capacity);
                stage.set_delay_samples(scale_to_rate(ALLPASS_TUNINGS[i], sample_rate));
                stage
            }),
        }
    }

    /// Active delay of each stage, in samples.
    pub fn delay_samples(&self) -> [usize; NUM_ALLPASSES] {
        core::array::from_fn(|i| self.stages[i].delay_samples())
    }

    /// Sets every stage's gain from the diffusion amount.
    pub fn set_diffusion(&mut self, diffusion: f32) {
        let gain = diffusion_gain(diffusion);
        for stage in &mut self.stages {
            stage.set_gain(gain);
        }
    }

    /// Gain currently applied to every stage.
    pub fn gain(&self) -> f32 {
        self.stages[0].gain()
    }

    /// Diffuses `buffer` in place through all stages in order.
    pub fn process(&mut self, buffer: &mut [f32], path: ProcessPath) {
        for stage in &mut self.stages {
            stage.process_block_inplace(buffer, path);
        }
    }

    /// Silences every stage.
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.clear();
        }
    }

    /// Returns `true` when no stage holds energy.
    pub fn is_silent(&self) -> bool {
        self.stages.iter().all(AllpassFilter::is_silent)
    }
}
