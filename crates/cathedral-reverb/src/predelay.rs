//! Pre-delay stage ahead of the comb bank.

use crate::topology::{PREDELAY_MAX_SECONDS, capacity_for};
use cathedral_core::{DelayLine, ms_to_samples};

/// Fixed-capacity delay with a per-block delay time.
///
/// The write cursor always cycles over the whole buffer and the read tap sits
/// `delay` samples behind it, so changing the delay moves the tap without
/// discarding history. A delay of zero passes the signal straight through and
/// leaves the buffer untouched.
#[derive(Debug, Clone)]
pub struct PreDelay {
    line: DelayLine,
    write_pos: usize,
    delay: usize,
    sample_rate: f32,
}

impl PreDelay {
    /// Creates a silent pre-delay holding up to 500 ms at `sample_rate`.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            line: DelayLine::new(capacity_for(PREDELAY_MAX_SECONDS, sample_rate)),
            write_pos: 0,
            delay: 0,
            sample_rate,
        }
    }

    /// Buffer capacity in samples.
    pub fn capacity(&self) -> usize {
        self.line.capacity()
    }

    /// Current delay in samples.
    pub fn delay_samples(&self) -> usize {
        self.delay
    }

    /// Sets the delay from milliseconds, truncating to whole samples and
    /// clamping to `[0, capacity - 1]`.
    pub fn set_delay_ms(&mut self, ms: f32) {
        let samples = ms_to_samples(ms.max(0.0), self.sample_rate) as usize;
        self.delay = samples.min(self.line.capacity() - 1);
    }

    /// Delays `buffer` in place.
    pub fn process_block(&mut self, buffer: &mut [f32]) {
        if self.delay == 0 {
            return;
        }
        let capacity = self.line.capacity();
        for sample in buffer.iter_mut() {
            let read_pos = self.write_pos + capacity - self.delay;
            let delayed = self.line.read(read_pos);
            self.line.write(self.write_pos, *sample);
            *sample = delayed;
            self.write_pos += 1;
            if self.write_pos >= capacity {
                self.write_pos = 0;
            }
        }
    }

    /// Zeroes the buffer and rewinds the cursor.
    pub fn reset(&mut self) {
        self.line.clear();
        self.write_pos = 0;
    }

    /// Returns `true` when the buffer holds no energy.
    pub fn is_silent(&self) -> bool {
        self.line.is_silent()
    }
}
