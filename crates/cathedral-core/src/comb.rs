//! Damped feedback comb filter.
//!
//! The recurrence, per sample:
//!
//! ```text
//! delayed = line[cursor]
//! flt     = delayed + d * (flt - delayed)   // one-pole lowpass on the tap only
//! y       = x + g * flt
//! line[cursor] = y; cursor += 1
//! ```
//!
//! The damping filter sits in the feedback path only, so it softens the decay
//! tail without touching the direct signal. `g` is clamped to `[0, 0.99]` and
//! `d` is derived from a cutoff frequency in Hz.

use crate::{DelayLine, OnePole, ProcessPath, SIMD_LANES};
use wide::f32x8;

/// Feedback gain the filter starts with.
pub const DEFAULT_FEEDBACK: f32 = 0.7;
/// Damping cutoff the filter starts with, in Hz.
pub const DEFAULT_DAMPING_HZ: f32 = 5000.0;

/// Schroeder feedback comb with a damped feedback path.
///
/// # Example
///
/// ```rust
/// use cathedral_core::CombFilter;
///
/// let mut comb = CombFilter::new(4800, 48000.0);
/// comb.set_delay_samples(1000);
/// comb.set_feedback(0.8);
/// comb.set_damping_hz(8000.0);
///
/// // The direct path is immediate
/// assert_eq!(comb.process(1.0), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct CombFilter {
    delay: DelayLine,
    damping: OnePole,
    feedback: f32,
}

impl CombFilter {
    /// Creates a comb with room for `capacity` samples of delay.
    ///
    /// The active delay starts at the full capacity; feedback starts at
    /// [`DEFAULT_FEEDBACK`] and damping at [`DEFAULT_DAMPING_HZ`].
    pub fn new(capacity: usize, sample_rate: f32) -> Self {
        Self {
            delay: DelayLine::new(capacity),
            damping: OnePole::new(sample_rate, DEFAULT_DAMPING_HZ),
            feedback: DEFAULT_FEEDBACK,
        }
    }

    /// Sets the delay length in samples, clamped to `[1, capacity]`.
    pub fn set_delay_samples(&mut self, samples: usize) {
        self.delay.set_active_length(samples);
    }

    /// Active delay length in samples.
    pub fn delay_samples(&self) -> usize {
        self.delay.active_length()
    }

    /// Delay capacity in samples.
    pub fn capacity(&self) -> usize {
        self.delay.capacity()
    }

    /// Sets the feedback gain, clamped to `[0, 0.99]`.
    #[inline]
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, 0.99);
    }

    /// Current feedback gain.
    #[inline]
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Sets the damping cutoff in Hz.
    ///
    /// The cutoff is clamped to `[20, sample_rate / 2]`, which keeps the damping
    /// coefficient strictly inside `(0, 1)`.
    pub fn set_damping_hz(&mut self, freq_hz: f32) {
        self.damping.set_frequency(freq_hz);
    }

    /// Damping coefficient `d` currently in use.
    #[inline]
    pub fn damping_coefficient(&self) -> f32 {
        self.damping.coefficient()
    }

    /// Recomputes the damping coefficient for a new sample rate.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.damping.set_sample_rate(sample_rate);
    }

    /// Processes one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let delayed = self.delay.tap();
        let damped = self.damping.process(delayed);
        let out = input + self.feedback * damped;
        self.delay.commit(out);
        out
    }

    /// Runs the block through the selected path.
    ///
    /// Processes `min(input.len(), output.len())` samples.
    pub fn process_block(&mut self, input: &[f32], output: &mut [f32], path: ProcessPath) {
        match path {
            ProcessPath::Scalar => self.process_block_scalar(input, output),
            ProcessPath::Vectorized => self.process_block_vectorized(input, output),
        }
    }

    /// Sample-by-sample reference implementation.
    pub fn process_block_scalar(&mut self, input: &[f32], output: &mut [f32]) {
        for (out, &x) in output.iter_mut().zip(input) {
            *out = self.process(x);
        }
    }

    /// Grouped implementation.
    ///
    /// Taps are gathered eight at a time and the damping recurrence is run
    /// through them in order; the feedback multiply-add is done as one `f32x8`
    /// operation. Lines shorter than one group run the scalar loop, since the
    /// group would otherwise read samples it has not written yet.
    pub fn process_block_vectorized(&mut self, input: &[f32], output: &mut [f32]) {
        let len = input.len().min(output.len());
        if self.delay.active_length() < SIMD_LANES {
            self.process_block_scalar(&input[..len], &mut output[..len]);
            return;
        }

        let gain = f32x8::splat(self.feedback);
        let mut taps = [0.0f32; SIMD_LANES];
        let mut dry = [0.0f32; SIMD_LANES];

        let in_groups = input[..len].chunks_exact(SIMD_LANES);
        let in_tail = in_groups.remainder();
        let mut out_groups = output[..len].chunks_exact_mut(SIMD_LANES);

        for (x, y) in in_groups.zip(&mut out_groups) {
            self.delay.gather(&mut taps);
            for tap in &mut taps {
                *tap = self.damping.process(*tap);
            }
            dry.copy_from_slice(x);
            let result = (f32x8::from(dry) + gain * f32x8::from(taps)).to_array();
            self.delay.scatter(&result);
            y.copy_from_slice(&result);
        }

        let out_tail = out_groups.into_remainder();
        self.process_block_scalar(in_tail, out_tail);
    }

    /// Zeroes the delay line and the damping memory.
    pub fn clear(&mut self) {
        self.delay.clear();
        self.damping.reset();
    }

    /// Returns `true` when no energy is stored in the filter.
    pub fn is_silent(&self) -> bool {
        self.delay.is_silent() && self.damping.state() == 0.0
    }
}
