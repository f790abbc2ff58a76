//! Four parallel damped combs.
//!
//! Every comb sees the same input; outputs are summed and scaled by 1/4.
//! Decay time, damping and bass multiply are mapped onto comb coefficients
//! once per block by [`CombBank::update`].

use crate::topology::{COMB_MAX_SECONDS, COMB_TUNINGS, NUM_COMBS, capacity_for, scale_to_rate};
use cathedral_core::{CombFilter, ProcessPath, map_range};

/// Output scale for the parallel sum.
pub const PARALLEL_SCALE: f32 = 0.25;

/// Comb feedback for a target decay time.
///
/// `g = clamp(10^(-3 * delay_ms / (decay_s * 1000)), 0.1, 0.99) * (1 + bass_mult * 0.05)`.
/// The bass multiply is a flat scale on the whole loop gain, and the result
/// is clamped again to `[0, 0.99]` when applied to a comb.
///
/// ```rust
/// use cathedral_reverb::comb_bank::comb_gain;
///
/// // Longer decays keep more energy per pass
/// assert!(comb_gain(25.7, 20.0, 0.0) > comb_gain(25.7, 2.0, 0.0));
/// // Bass multiply scales the loop gain linearly
/// let g = comb_gain(25.7, 2.0, 0.0);
/// assert!((comb_gain(25.7, 2.0, -10.0) - g * 0.5).abs() < 1e-6);
/// ```
pub fn comb_gain(delay_ms: f32, decay_s: f32, bass_mult: f32) -> f32 {
    let rt60_gain = libm::powf(10.0, -3.0 * delay_ms / (decay_s * 1000.0)).clamp(0.1, 0.99);
    rt60_gain * (1.0 + bass_mult * 0.05)
}

/// Damping cutoff for a damping percentage: 0 % is 20 kHz, 100 % is 2 kHz.
pub fn damping_frequency(damping_pct: f32) -> f32 {
    map_range(damping_pct.clamp(0.0, 100.0), 0.0, 100.0, 20000.0, 2000.0)
}

/// The parallel comb section.
#[derive(Debug, Clone)]
pub struct CombBank {
    combs: [CombFilter; NUM_COMBS],
    scratch: Vec<f32>,
    sample_rate: f32,
}

impl CombBank {
    /// Allocates combs for `sample_rate` and a scratch buffer of `max_block`
    /// samples. All state starts silent.
    pub fn new(sample_rate: f32, max_block: usize) -> Self {
        let capacity = capacity_for(COMB_MAX_SECONDS, sample_rate);
        let combs = core::array::from_fn(|i| {
            let mut comb = CombFilter::new(capacity, sample_rate);
            comb.set_delay_samples(scale_to_rate(COMB_TUNINGS[i], sample_rate));
            comb
        });
        Self {
            combs,
            scratch: vec![0.0; max_block.max(1)],
            sample_rate,
        }
    }

    /// Active delay of each comb, in samples.
    pub fn delay_samples(&self) -> [usize; NUM_COMBS] {
        core::array::from_fn(|i| self.combs[i].delay_samples())
    }

    /// Mean comb delay in milliseconds.
    ///
    /// Every comb's feedback is derived from this single average rather than
    /// its own delay.
    pub fn average_delay_ms(&self) -> f32 {
        let total: usize = self.combs.iter().map(CombFilter::delay_samples).sum();
        total as f32 / NUM_COMBS as f32 * 1000.0 / self.sample_rate
    }

    /// Recomputes feedback and damping from the user-facing parameters.
    pub fn update(&mut self, decay_s: f32, damping_pct: f32, bass_mult: f32) {
        let gain = comb_gain(self.average_delay_ms(), decay_s, bass_mult);
        let damping_hz = damping_frequency(damping_pct);
        for comb in &mut self.combs {
            comb.set_damping_hz(damping_hz);
            comb.set_feedback(gain);
        }
    }

    /// Feedback currently applied to every comb.
    pub fn feedback(&self) -> f32 {
        self.combs[0].feedback()
    }

    /// Damping coefficient currently applied to every comb.
    pub fn damping_coefficient(&self) -> f32 {
        self.combs[0].damping_coefficient()
    }

    /// Runs all combs over `input` and writes the scaled sum to `output`.
    ///
    /// Blocks longer than the scratch buffer are handled in pieces.
    pub fn process(&mut self, input: &[f32], output: &mut [f32], path: ProcessPath) {
        let len = input.len().min(output.len());
        let piece = self.scratch.len();

        for (x, y) in input[..len].chunks(piece).zip(output[..len].chunks_mut(piece)) {
            let scratch = &mut self.scratch[..x.len()];
            y.fill(0.0);
            for comb in &mut self.combs {
                comb.process_block(x, scratch, path);
                for (acc, &s) in y.iter_mut().zip(scratch.iter()) {
                    *acc += s;
                }
            }
            for acc in y.iter_mut() {
                *acc *= PARALLEL_SCALE;
            }
        }
    }

    /// Silences every comb.
    pub fn reset(&mut self) {
        for comb in &mut self.combs {
            comb.clear();
        }
        self.scratch.fill(0.0);
    }

    /// Returns `true` when no comb holds energy.
    pub fn is_silent(&self) -> bool {
        self.combs.iter().all(CombFilter::is_silent)
    }
}
