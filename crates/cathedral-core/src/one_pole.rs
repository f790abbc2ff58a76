//! Smoothing lowpass shared by the comb damping and the hi-cut.
//!
//! ```text
//! y[n] = x[n] + c * (y[n-1] - x[n])
//! ```
//!
//! Two ways to set `c`:
//!
//! - by cutoff, `c = exp(-2π * fc / fs)`, as the comb damping does
//!   (20 kHz bright to 2 kHz dark)
//! - directly, as the hi-cut does with its dB-derived amount
//!
//! ```rust
//! use cathedral_core::OnePole;
//!
//! let mut damping = OnePole::new(48000.0, 2000.0);
//! assert!(damping.process(1.0) < 0.3);
//!
//! let mut passthrough = OnePole::with_coefficient(0.0);
//! assert_eq!(passthrough.process(0.25), 0.25);
//! ```

use crate::flush_denormal;
use libm::expf;

/// Single-pole lowpass with its memory. The coefficient stays in `[0, 1)` and
/// the memory is flushed to zero below 1e-20.
#[derive(Debug, Clone)]
pub struct OnePole {
    state: f32,
    coeff: f32,
    sample_rate: f32,
    freq: f32,
}

impl OnePole {
    /// Filter tuned to `freq_hz` at `sample_rate`.
    pub fn new(sample_rate: f32, freq_hz: f32) -> Self {
        let mut filter = Self {
            state: 0.0,
            coeff: 0.0,
            sample_rate,
            freq: freq_hz,
        };
        filter.recalculate_coeff();
        filter
    }

    /// Create a filter with a raw smoothing coefficient instead of a cutoff.
    pub fn with_coefficient(coeff: f32) -> Self {
        let mut filter = Self {
            state: 0.0,
            coeff: 0.0,
            sample_rate: 0.0,
            freq: 0.0,
        };
        filter.set_coefficient(coeff);
        filter
    }

    /// Set the cutoff frequency and recalculate the coefficient.
    ///
    /// The frequency is clamped to `[20, sample_rate / 2]`.
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.freq = freq_hz;
        self.recalculate_coeff();
    }

    /// Cutoff frequency in Hz (0 when driven by a raw coefficient).
    pub fn frequency(&self) -> f32 {
        self.freq
    }

    /// Set the smoothing coefficient directly, clamped to `[0, 0.9999]`.
    ///
    /// 0 passes the input unchanged; values near 1 smooth heavily.
    pub fn set_coefficient(&mut self, coeff: f32) {
        self.coeff = coeff.clamp(0.0, 0.9999);
    }

    /// Current smoothing coefficient.
    #[inline]
    pub fn coefficient(&self) -> f32 {
        self.coeff
    }

    /// Filters one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.state = flush_denormal(input + self.coeff * (self.state - input));
        self.state
    }

    /// Last output value.
    #[inline]
    pub fn state(&self) -> f32 {
        self.state
    }

    /// Zeroes the memory.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }

    /// Retunes the cutoff for a new sample rate.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coeff();
    }

    // Raw-coefficient filters have no sample rate and keep their coefficient.
    fn recalculate_coeff(&mut self) {
        if self.sample_rate <= 0.0 {
            return;
        }
        // Nyquist wins over the 20 Hz floor below 40 Hz sample rates
        let freq = self.freq.max(20.0).min(self.sample_rate * 0.5);
        self.coeff = expf(-core::f32::consts::TAU * freq / self.sample_rate);
    }
}
