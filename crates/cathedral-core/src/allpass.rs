//! Schroeder allpass filter for reverb diffusion.
//!
//! One delay line holds `v[n] = x[n] + g·v[n-M]` and the output taps it
//! directly:
//!
//! ```text
//! delayed = line[cursor]                 // v[n-M]
//! y       = -g * x + delayed
//! line[cursor] = x + g * delayed; cursor += 1
//! ```
//!
//! The impulse response is `-g` at 0, then `g^(k-1)` at every `k·M`. A chain
//! of these smears echoes in time. White noise comes out
//! `sqrt(g² + 1/(1-g²))` times louder in RMS.

use crate::{DelayLine, ProcessPath, SIMD_LANES};
use wide::f32x8;

/// Gain the filter starts with.
pub const DEFAULT_GAIN: f32 = 0.5;

/// Schroeder allpass stage.
///
/// # Example
///
/// ```rust
/// use cathedral_core::AllpassFilter;
///
/// let mut ap = AllpassFilter::new(500);
/// ap.set_delay_samples(100);
/// ap.set_gain(0.5);
///
/// // Direct path is -g
/// assert_eq!(ap.process(1.0), -0.5);
/// ```
#[derive(Debug, Clone)]
pub struct AllpassFilter {
    delay: DelayLine,
    gain: f32,
}

impl AllpassFilter {
    /// Creates an allpass with room for `capacity` samples of delay.
    pub fn new(capacity: usize) -> Self {
        let mut filter = Self {
            delay: DelayLine::new(capacity),
            gain: 0.0,
        };
        filter.set_gain(DEFAULT_GAIN);
        filter
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

    /// Sets the allpass gain, clamped to `[-0.99, 0.99]`.
    #[inline]
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain.clamp(-0.99, 0.99);
    }

    /// Current allpass gain.
    #[inline]
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Processes one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let delayed = self.delay.tap();
        let out = -self.gain * input + delayed;
        self.delay.commit(input + self.gain * delayed);
        out
    }

    /// Runs `input` into `output` through the selected path.
    ///
    /// Processes `min(input.len(), output.len())` samples.
    pub fn process_block(&mut self, input: &[f32], output: &mut [f32], path: ProcessPath) {
        let len = input.len().min(output.len());
        output[..len].copy_from_slice(&input[..len]);
        self.process_block_inplace(&mut output[..len], path);
    }

    /// Filters `buffer` in place through the selected path.
    pub fn process_block_inplace(&mut self, buffer: &mut [f32], path: ProcessPath) {
        match path {
            ProcessPath::Scalar => self.process_inplace_scalar(buffer),
            ProcessPath::Vectorized => self.process_inplace_vectorized(buffer),
        }
    }

    /// Sample-by-sample reference implementation.
    pub fn process_inplace_scalar(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Grouped implementation: eight taps are gathered, both multiply-adds
    /// run as `f32x8`, and the new line values are scattered back. Lines
    /// shorter than one group use the scalar loop.
    pub fn process_inplace_vectorized(&mut self, buffer: &mut [f32]) {
        if self.delay.active_length() < SIMD_LANES {
            self.process_inplace_scalar(buffer);
            return;
        }

        let gain = f32x8::splat(self.gain);
        let neg_gain = f32x8::splat(-self.gain);
        let mut taps = [0.0f32; SIMD_LANES];
        let mut block = [0.0f32; SIMD_LANES];

        let mut groups = buffer.chunks_exact_mut(SIMD_LANES);
        for group in &mut groups {
            self.delay.gather(&mut taps);
            block.copy_from_slice(group);

            let x = f32x8::from(block);
            let delayed = f32x8::from(taps);
            let stored = (x + gain * delayed).to_array();
            let out = (neg_gain * x + delayed).to_array();

            self.delay.scatter(&stored);
            group.copy_from_slice(&out);
        }

        self.process_inplace_scalar(groups.into_remainder());
    }

    /// Zeroes the delay line.
    pub fn clear(&mut self) {
        self.delay.clear();
    }

    /// Returns `true` when the delay line holds no energy.
    pub fn is_silent(&self) -> bool {
        self.delay.is_silent()
    }
}
