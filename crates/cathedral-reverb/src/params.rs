//! The reverb's parameter set.
//!
//! Nine bounded values drive the engine. They are the only persistent state:
//! everything else (filter memories, delay contents, coefficients) is derived
//! or transient.
//!
//! | Parameter | ID | String ID | Range | Default |
//! |-----------|----|-----------|-------|---------|
//! | Decay Time | 100 | `decay` | 2 - 20 s | 5 s |
//! | Pre-Delay | 101 | `predelay` | 0 - 500 ms | 50 ms |
//! | Damping | 102 | `damping` | 0 - 100 % | 50 % |
//! | Diffusion | 103 | `diffusion` | 0 - 20 | 10 |
//! | Hi-Cut | 104 | `hicut` | 0 - 30 dB | 0 dB |
//! | Bass Multiply | 105 | `bassmult` | -10 - 10 | 0 |
//! | Wet Mix | 106 | `wet` | 0 - 1 | 0.5 |
//! | Bypass | 107 | `bypass` | off/on | off |
//! | SIMD | 108 | `simd` | off/on | off |

use cathedral_core::{ParamDescriptor, ParamId, ParamUnit, ProcessPath};

/// Number of reverb parameters.
pub const PARAM_COUNT: usize = 9;

/// Identifies one reverb parameter. The discriminant is its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReverbParam {
    /// Decay time in seconds (RT60 target).
    Decay,
    /// Pre-delay in milliseconds.
    PreDelay,
    /// High-frequency damping in the comb feedback, percent.
    Damping,
    /// Allpass diffusion amount, 0 - 20.
    Diffusion,
    /// Input hi-cut amount in dB.
    HiCut,
    /// Global comb gain multiplier, -10 - 10.
    BassMult,
    /// Wet/dry mix, 0 - 1.
    Wet,
    /// Pass input through untouched.
    Bypass,
    /// Use the vectorized filter path.
    Simd,
}

static DESCRIPTORS: [ParamDescriptor; PARAM_COUNT] = [
    ParamDescriptor::ranged(ParamUnit::Seconds, ("Decay Time", "Decay"), (2.0, 20.0), 5.0)
        .with_id(ParamId(100), "decay"),
    ParamDescriptor::ranged(ParamUnit::Milliseconds, ("Pre-Delay", "PreDly"), (0.0, 500.0), 50.0)
        .with_id(ParamId(101), "predelay"),
    ParamDescriptor::percent("Damping", "Damp", 50.0).with_id(ParamId(102), "damping"),
    ParamDescriptor::custom("Diffusion", "Diffuse", ParamUnit::None, 0.0, 20.0, 10.0, 0.1)
        .with_id(ParamId(103), "diffusion"),
    ParamDescriptor::ranged(ParamUnit::Decibels, ("Hi-Cut", "HiCut"), (0.0, 30.0), 0.0)
        .with_id(ParamId(104), "hicut"),
    ParamDescriptor::custom("Bass Multiply", "Bass", ParamUnit::None, -10.0, 10.0, 0.0, 0.1)
        .with_id(ParamId(105), "bassmult"),
    ParamDescriptor::custom("Wet Mix", "Wet", ParamUnit::None, 0.0, 1.0, 0.5, 0.01)
        .with_id(ParamId(106), "wet"),
    ParamDescriptor::toggle("Bypass", "Bypass", false).with_id(ParamId(107), "bypass"),
    ParamDescriptor::toggle("Use SIMD (Low CPU)", "SIMD", false).with_id(ParamId(108), "simd"),
];

impl ReverbParam {
    /// All parameters in index order.
    pub const ALL: [Self; PARAM_COUNT] = [
        Self::Decay,
        Self::PreDelay,
        Self::Damping,
        Self::Diffusion,
        Self::HiCut,
        Self::BassMult,
        Self::Wet,
        Self::Bypass,
        Self::Simd,
    ];

    /// Zero-based parameter index.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Parameter at `index`, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parameter with the given string ID (`"decay"`, `"wet"`, ...).
    pub fn from_string_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.string_id() == id)
    }

    /// Metadata for this parameter.
    #[inline]
    pub fn descriptor(self) -> &'static ParamDescriptor {
        &DESCRIPTORS[self.index()]
    }

    /// Stable textual ID used as the serialization key.
    pub fn string_id(self) -> &'static str {
        self.descriptor().string_id
    }

    /// Whether this is an on/off switch.
    pub fn is_toggle(self) -> bool {
        self.descriptor().is_stepped()
    }
}

/// All parameter descriptors in index order.
pub fn descriptors() -> &'static [ParamDescriptor; PARAM_COUNT] {
    &DESCRIPTORS
}

/// A snapshot of every reverb parameter.
///
/// Plain data: the engine reads it once per block and never mutates it.
///
/// ```rust
/// use cathedral_reverb::{ReverbParam, ReverbParams};
///
/// let mut params = ReverbParams::default();
/// assert_eq!(params.decay_time, 5.0);
///
/// params.set(ReverbParam::PreDelay, 9000.0);
/// assert_eq!(params.pre_delay_ms, 500.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbParams {
    /// Decay time in seconds, [2, 20].
    pub decay_time: f32,
    /// Pre-delay in milliseconds, [0, 500].
    pub pre_delay_ms: f32,
    /// Damping in percent, [0, 100].
    pub damping_pct: f32,
    /// Diffusion, [0, 20].
    pub diffusion: f32,
    /// Hi-cut in dB, [0, 30].
    pub hi_cut_db: f32,
    /// Bass multiply, [-10, 10].
    pub bass_mult: f32,
    /// Wet mix, [0, 1].
    pub wet_mix: f32,
    /// Bypass switch.
    pub bypass: bool,
    /// Vectorized path switch.
    pub use_simd: bool,
}

impl Default for ReverbParams {
    fn default() -> Self {
        let mut values = [0.0; PARAM_COUNT];
        for (value, desc) in values.iter_mut().zip(descriptors()) {
            *value = desc.default;
        }
        Self::from_values(&values)
    }
}

impl ReverbParams {
    /// Builds a parameter set from values in index order, clamping each.
    pub fn from_values(values: &[f32; PARAM_COUNT]) -> Self {
        let mut params = Self {
            decay_time: 0.0,
            pre_delay_ms: 0.0,
            damping_pct: 0.0,
            diffusion: 0.0,
            hi_cut_db: 0.0,
            bass_mult: 0.0,
            wet_mix: 0.0,
            bypass: false,
            use_simd: false,
        };
        for (param, &value) in ReverbParam::ALL.iter().zip(values) {
            params.set(*param, value);
        }
        params
    }

    /// Values in index order; switches read as `0.0` / `1.0`.
    pub fn to_values(&self) -> [f32; PARAM_COUNT] {
        ReverbParam::ALL.map(|p| self.get(p))
    }

    /// Reads one parameter as `f32`.
    pub fn get(&self, param: ReverbParam) -> f32 {
        match param {
            ReverbParam::Decay => self.decay_time,
            ReverbParam::PreDelay => self.pre_delay_ms,
            ReverbParam::Damping => self.damping_pct,
            ReverbParam::Diffusion => self.diffusion,
            ReverbParam::HiCut => self.hi_cut_db,
            ReverbParam::BassMult => self.bass_mult,
            ReverbParam::Wet => self.wet_mix,
            ReverbParam::Bypass => switch_value(self.bypass),
            ReverbParam::Simd => switch_value(self.use_simd),
        }
    }

    /// Writes one parameter, clamped to its range. Switches turn on at `>= 0.5`.
    pub fn set(&mut self, param: ReverbParam, value: f32) {
        let value = param.descriptor().clamp(value);
        match param {
            ReverbParam::Decay => self.decay_time = value,
            ReverbParam::PreDelay => self.pre_delay_ms = value,
            ReverbParam::Damping => self.damping_pct = value,
            ReverbParam::Diffusion => self.diffusion = value,
            ReverbParam::HiCut => self.hi_cut_db = value,
            ReverbParam::BassMult => self.bass_mult = value,
            ReverbParam::Wet => self.wet_mix = value,
            ReverbParam::Bypass => self.bypass = value >= 0.5,
            ReverbParam::Simd => self.use_simd = value >= 0.5,
        }
    }

    /// Copy with every field forced into range.
    pub fn clamped(&self) -> Self {
        Self::from_values(&self.to_values())
    }

    /// Filter path selected by the SIMD switch.
    pub fn process_path(&self) -> ProcessPath {
        ProcessPath::from_flag(self.use_simd)
    }
}

fn switch_value(on: bool) -> f32 {
    if on { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_table() {
        let p = ReverbParams::default();
        assert_eq!(p.decay_time, 5.0);
        assert_eq!(p.pre_delay_ms, 50.0);
        assert_eq!(p.damping_pct, 50.0);
        assert_eq!(p.diffusion, 10.0);
        assert_eq!(p.hi_cut_db, 0.0);
        assert_eq!(p.bass_mult, 0.0);
        assert_eq!(p.wet_mix, 0.5);
        assert!(!p.bypass);
        assert!(!p.use_simd);
    }

    #[test]
    fn ids_are_stable_and_unique() {
        for (i, param) in ReverbParam::ALL.iter().enumerate() {
            assert_eq!(param.index(), i);
            assert_eq!(param.descriptor().id, ParamId(100 + i as u32));
            assert_eq!(ReverbParam::from_string_id(param.string_id()), Some(*param));
            assert_eq!(ReverbParam::from_index(i), Some(*param));
        }
        assert_eq!(ReverbParam::from_index(PARAM_COUNT), None);
        assert_eq!(ReverbParam::from_string_id("size"), None);
    }

    #[test]
    fn only_switches_are_toggles() {
        let toggles: Vec<_> = ReverbParam::ALL.into_iter().filter(|p| p.is_toggle()).collect();
        assert_eq!(toggles, vec![ReverbParam::Bypass, ReverbParam::Simd]);
    }

    #[test]
    fn set_clamps_to_range() {
        let mut p = ReverbParams::default();
        p.set(ReverbParam::Decay, 0.5);
        assert_eq!(p.decay_time, 2.0);
        p.set(ReverbParam::BassMult, -40.0);
        assert_eq!(p.bass_mult, -10.0);
        p.set(ReverbParam::Wet, f32::NAN);
        assert_eq!(p.wet_mix, 0.5);
        p.set(ReverbParam::Bypass, 0.7);
        assert!(p.bypass);
        p.set(ReverbParam::Bypass, 0.2);
        assert!(!p.bypass);
    }

    #[test]
    fn clamped_fixes_direct_field_writes() {
        let p = ReverbParams {
            decay_time: 100.0,
            hi_cut_db: -3.0,
            wet_mix: 2.0,
            ..ReverbParams::default()
        }
        .clamped();
        assert_eq!(p.decay_time, 20.0);
        assert_eq!(p.hi_cut_db, 0.0);
        assert_eq!(p.wet_mix, 1.0);
    }

    #[test]
    fn values_roundtrip() {
        let p = ReverbParams {
            decay_time: 12.5,
            pre_delay_ms: 120.0,
            damping_pct: 33.0,
            diffusion: 4.5,
            hi_cut_db: 6.0,
            bass_mult: -2.5,
            wet_mix: 0.8,
            bypass: true,
            use_simd: true,
        };
        assert_eq!(ReverbParams::from_values(&p.to_values()), p);
    }
}
