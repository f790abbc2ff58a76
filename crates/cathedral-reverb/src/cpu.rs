//! Per-block processing cost measurement.

use std::time::{Duration, Instant};

/// Ratio of wall-clock processing time to the block's real-time duration.
///
/// A value of 1.0 means the block took exactly as long to compute as it takes
/// to play back.
#[derive(Debug, Clone)]
pub struct CpuMeter {
    sample_rate: f32,
    last: f32,
}

impl CpuMeter {
    /// Creates a meter reading zero.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            last: 0.0,
        }
    }

    /// Starts timing a block.
    #[inline]
    pub fn start(&self) -> Instant {
        Instant::now()
    }

    /// Finishes timing a block of `num_samples` started at `started`.
    pub fn finish(&mut self, started: Instant, num_samples: usize) {
        self.record(started.elapsed(), num_samples);
    }

    /// Records an already-measured block duration.
    pub fn record(&mut self, elapsed: Duration, num_samples: usize) {
        if num_samples == 0 || self.sample_rate <= 0.0 {
            return;
        }
        let expected = num_samples as f64 / f64::from(self.sample_rate);
        self.last = (elapsed.as_secs_f64() / expected) as f32;
    }

    /// Ratio for the last measured block.
    pub fn usage(&self) -> f32 {
        self.last
    }
}
