//! Input hi-cut applied to the mono reverb feed.

use cathedral_core::{OnePole, db_to_linear};

/// Hi-cut amounts at or below this many dB leave the signal untouched.
pub const HI_CUT_THRESHOLD_DB: f32 = 0.01;

/// One-pole lowpass on the pre-reverb signal.
///
/// `state += cutoff_gain * (x - state)` with `cutoff_gain = 10^(-hi_cut_db / 20)`,
/// so 0 dB is transparent and larger amounts smooth harder. The filter memory
/// belongs to the instance and persists across blocks.
#[derive(Debug, Clone)]
pub struct ToneShaper {
    filter: OnePole,
}

impl Default for ToneShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl ToneShaper {
    /// Creates a transparent shaper with silent memory.
    pub fn new() -> Self {
        Self {
            filter: OnePole::with_coefficient(0.0),
        }
    }

    /// Filters `buffer` in place. No-op for amounts at or below
    /// [`HI_CUT_THRESHOLD_DB`].
    pub fn process_block(&mut self, buffer: &mut [f32], hi_cut_db: f32) {
        if hi_cut_db <= HI_CUT_THRESHOLD_DB {
            return;
        }
        let cutoff_gain = db_to_linear(-hi_cut_db);
        self.filter.set_coefficient(1.0 - cutoff_gain);
        for sample in buffer.iter_mut() {
            *sample = self.filter.process(*sample);
        }
    }

    /// Clears the filter memory.
    pub fn reset(&mut self) {
        self.filter.reset();
    }

    /// Returns `true` when the filter memory is zero.
    pub fn is_silent(&self) -> bool {
        self.filter.state() == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_db_is_bypassed() {
        let mut tone = ToneShaper::new();
        let mut buf = [1.0, -1.0, 0.5, 0.25];
        tone.process_block(&mut buf, 0.0);
        assert_eq!(buf, [1.0, -1.0, 0.5, 0.25]);
        tone.process_block(&mut buf, 0.01);
        assert_eq!(buf, [1.0, -1.0, 0.5, 0.25]);
        assert!(tone.is_silent());
    }

    #[test]
    fn first_sample_scaled_by_cutoff_gain() {
        let mut tone = ToneShaper::new();
        let mut buf = [1.0, 0.0];
        tone.process_block(&mut buf, 20.0);
        // 10^(-20/20) = 0.1
        assert!((buf[0] - 0.1).abs() < 1e-5);
        assert!((buf[1] - 0.09).abs() < 1e-5);
    }

    #[test]
    fn more_cut_means_less_high_frequency() {
        let nyquist: Vec<f32> = (0..2000).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let energy = |db: f32| {
            let mut tone = ToneShaper::new();
            let mut buf = nyquist.clone();
            tone.process_block(&mut buf, db);
            buf[1000..].iter().map(|s| s * s).sum::<f32>()
        };
        assert!(energy(30.0) < energy(6.0));
        assert!(energy(6.0) < energy(0.0));
    }

    #[test]
    fn memory_is_per_instance() {
        let mut a = ToneShaper::new();
        let mut b = ToneShaper::new();
        let mut buf = [1.0; 16];
        a.process_block(&mut buf, 12.0);
        assert!(!a.is_silent());
        assert!(b.is_silent());

        let mut fresh = [1.0, 0.0];
        b.process_block(&mut fresh, 20.0);
        assert!((fresh[0] - 0.1).abs() < 1e-5);
    }

    #[test]
    fn reset_clears_memory() {
        let mut tone = ToneShaper::new();
        let mut buf = [1.0; 8];
        tone.process_block(&mut buf, 6.0);
        tone.reset();
        assert!(tone.is_silent());
    }
}
