//! Fixed network tunings and buffer capacities.
//!
//! Delay lengths are given in samples at a 48 kHz reference and scaled
//! linearly to the running sample rate.

/// Rate the tuning tables are expressed at.
pub const REFERENCE_RATE: f32 = 48000.0;

/// Number of parallel combs.
pub const NUM_COMBS: usize = 4;

/// Number of series allpass stages.
pub const NUM_ALLPASSES: usize = 8;

/// Comb delay lengths at [`REFERENCE_RATE`].
pub const COMB_TUNINGS: [usize; NUM_COMBS] = [1116, 1188, 1277, 1356];

/// Allpass delay lengths at [`REFERENCE_RATE`], in chain order.
pub const ALLPASS_TUNINGS: [usize; NUM_ALLPASSES] = [556, 441, 313, 391, 347, 113, 37, 59];

/// Comb buffer capacity, in seconds of audio.
pub const COMB_MAX_SECONDS: f32 = 0.1;

/// Allpass buffer capacity, in seconds of audio.
pub const ALLPASS_MAX_SECONDS: f32 = 0.05;

/// Pre-delay buffer capacity, in seconds of audio.
pub const PREDELAY_MAX_SECONDS: f32 = 0.5;

/// Reported reverb tail, in seconds.
pub const TAIL_SECONDS: f32 = 20.0;

/// Scales a reference-rate delay to `sample_rate`, truncating.
///
/// ```rust
/// use cathedral_reverb::topology::scale_to_rate;
///
/// assert_eq!(scale_to_rate(1116, 48000.0), 1116);
/// assert_eq!(scale_to_rate(1116, 44100.0), 1025);
/// assert_eq!(scale_to_rate(37, 96000.0), 74);
/// ```
pub fn scale_to_rate(samples: usize, sample_rate: f32) -> usize {
    ((samples as f64 * f64::from(sample_rate) / f64::from(REFERENCE_RATE)) as usize).max(1)
}

/// Buffer capacity in samples for `seconds` of audio, at least one sample.
pub fn capacity_for(seconds: f32, sample_rate: f32) -> usize {
    ((sample_rate * seconds) as usize).max(1)
}
