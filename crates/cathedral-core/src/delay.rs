//! Fixed-capacity circular delay line.
//!
//! Every stage of the reverb is built on [`DelayLine`]: the pre-delay uses it
//! standalone, and each comb and allpass filter embeds one. The buffer is
//! allocated once when the line is created and never reallocates; changing the
//! delay time only moves the wrap point (the *active length*).
//!
//! # Read-before-write
//!
//! [`DelayLine::step`] reads the sample under the cursor *before* overwriting
//! it, then advances the cursor, wrapping at the active length. A line with
//! active length `n` therefore returns each written sample exactly `n` steps
//! later. Filters that need to compute the written value from the tapped one
//! use [`DelayLine::tap`] and [`DelayLine::commit`] instead of `step`.

use alloc::vec;
use alloc::vec::Vec;

/// Circular buffer delay with a runtime-adjustable active length.
///
/// # Invariants
///
/// - `1 <= active_len <= capacity`
/// - `cursor < active_len`
///
/// # Example
///
/// ```rust
/// use cathedral_core::DelayLine;
///
/// let mut line = DelayLine::new(16);
/// line.set_active_length(3);
///
/// assert_eq!(line.step(1.0), 0.0);
/// assert_eq!(line.step(0.0), 0.0);
/// assert_eq!(line.step(0.0), 0.0);
/// assert_eq!(line.step(0.0), 1.0); // three samples later
/// ```
#[derive(Debug, Clone)]
pub struct DelayLine {
    buffer: Vec<f32>,
    cursor: usize,
    active_len: usize,
}

impl DelayLine {
    /// Creates a zeroed delay line holding up to `capacity` samples.
    ///
    /// The active length starts at the full capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Delay capacity must be > 0");

        Self {
            buffer: vec![0.0; capacity],
            cursor: 0,
            active_len: capacity,
        }
    }

    /// Total number of samples the line can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Current wrap point of the cursor (the delay in samples).
    #[inline]
    pub fn active_length(&self) -> usize {
        self.active_len
    }

    /// Current cursor position, always below the active length.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Sets the delay in samples, clamped to `[1, capacity]`.
    ///
    /// Buffer contents are kept. If the cursor falls outside the new length it
    /// wraps back to the start.
    pub fn set_active_length(&mut self, len: usize) {
        self.active_len = len.clamp(1, self.buffer.len());
        if self.cursor >= self.active_len {
            self.cursor = 0;
        }
    }

    /// Reads the sample stored at `index` (taken modulo capacity).
    #[inline]
    pub fn read(&self, index: usize) -> f32 {
        self.buffer[index % self.buffer.len()]
    }

    /// Stores `value` at `index` (taken modulo capacity).
    #[inline]
    pub fn write(&mut self, index: usize, value: f32) {
        let len = self.buffer.len();
        self.buffer[index % len] = value;
    }

    /// Returns the sample under the cursor without moving it.
    #[inline]
    pub fn tap(&self) -> f32 {
        self.buffer[self.cursor]
    }

    /// Writes `value` under the cursor and advances it by one.
    #[inline]
    pub fn commit(&mut self, value: f32) {
        self.buffer[self.cursor] = value;
        self.cursor += 1;
        if self.cursor >= self.active_len {
            self.cursor = 0;
        }
    }

    /// Reads the delayed sample, writes `input`, and advances the cursor.
    #[inline]
    pub fn step(&mut self, input: f32) -> f32 {
        let delayed = self.tap();
        self.commit(input);
        delayed
    }

    /// Copies the next `out.len()` samples after the cursor into `out`,
    /// wrapping at the active length. The cursor does not move.
    ///
    /// Only meaningful when `out.len() <= active_length()`; longer requests
    /// would read positions the matching [`scatter`](Self::scatter) has not
    /// written yet.
    #[inline]
    pub fn gather(&self, out: &mut [f32]) {
        let mut pos = self.cursor;
        for slot in out.iter_mut() {
            *slot = self.buffer[pos];
            pos += 1;
            if pos >= self.active_len {
                pos = 0;
            }
        }
    }

    /// Writes `values` starting at the cursor, wrapping at the active length,
    /// and advances the cursor past them.
    #[inline]
    pub fn scatter(&mut self, values: &[f32]) {
        for &value in values {
            self.commit(value);
        }
    }

    /// Zeroes the buffer and rewinds the cursor. The active length is kept.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.cursor = 0;
    }

    /// Returns `true` if every stored sample is exactly zero.
    pub fn is_silent(&self) -> bool {
        self.buffer.iter().all(|&s| s == 0.0)
    }
}
