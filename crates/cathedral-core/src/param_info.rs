//! Parameter metadata shared by the engine, the state blob and the CLI.
//!
//! Each reverb control is described by a [`ParamDescriptor`] carrying its
//! range, default, display unit and two stable keys: a numeric [`ParamId`] and
//! a `string_id` used in preset files and serialized state. Anything that
//! stores parameters by index implements [`ParameterInfo`] and gets lookup and
//! normalized access for free.
//!
//! ```rust
//! use cathedral_core::{ParamDescriptor, ParamId, ParamUnit, ParameterInfo};
//!
//! struct Send(f32);
//!
//! impl ParameterInfo for Send {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         (index == 0).then(|| {
//!             ParamDescriptor::ranged(ParamUnit::Decibels, ("Send Level", "Send"), (-60.0, 0.0), -12.0)
//!                 .with_id(ParamId(1), "send")
//!         })
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         if index == 0 { self.0 } else { 0.0 }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if let Some(desc) = self.param_info(index) {
//!             self.0 = desc.clamp(value);
//!         }
//!     }
//! }
//!
//! let mut send = Send(-12.0);
//! assert_eq!(send.find_param_by_string_id("send"), Some(0));
//! send.set_normalized(0, 1.0);
//! assert_eq!(send.get_param(0), 0.0);
//! ```

/// Numeric parameter key. Never reused or renumbered once published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Index-addressed parameter access.
///
/// Out-of-range indices read as `0.0` and writes to them are ignored.
pub trait ParameterInfo {
    /// Number of parameters; valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor at `index`, `None` past the end.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current plain value at `index`.
    fn get_param(&self, index: usize) -> f32;

    /// Stores `value` at `index`, clamped to the descriptor range.
    fn set_param(&mut self, index: usize, value: f32);

    /// Index whose display or short name matches `name`, ignoring ASCII case.
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|d| {
                d.name.eq_ignore_ascii_case(name) || d.short_name.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Index with this exact `string_id`.
    fn find_param_by_string_id(&self, string_id: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.string_id == string_id))
    }

    /// Index with this numeric ID. Linear scan.
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }

    /// Writes `normalized` (clamped to `[0, 1]`) mapped onto the plain range.
    fn set_normalized(&mut self, index: usize, normalized: f32) {
        if let Some(desc) = self.param_info(index) {
            self.set_param(index, desc.denormalize(normalized.clamp(0.0, 1.0)));
        }
    }
}

/// Range, default and naming for one parameter.
///
/// ```rust
/// use cathedral_core::{ParamDescriptor, ParamId, ParamUnit};
///
/// let predelay = ParamDescriptor::ranged(ParamUnit::Milliseconds, ("Pre-Delay", "PreDly"), (0.0, 500.0), 50.0)
///     .with_id(ParamId(101), "predelay");
/// assert_eq!(predelay.step, 1.0);
/// assert_eq!(predelay.clamp(900.0), 500.0);
/// assert_eq!(predelay.normalize(250.0), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Display name, e.g. "Decay Time".
    pub name: &'static str,
    /// Abbreviation of at most 8 characters.
    pub short_name: &'static str,
    /// Display unit.
    pub unit: ParamUnit,
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
    /// Initial value.
    pub default: f32,
    /// Suggested increment for continuous controls.
    pub step: f32,
    /// Numeric key, `ParamId(0)` until assigned.
    pub id: ParamId,
    /// Textual key, empty until assigned.
    pub string_id: &'static str,
    /// On/off switch stored as `0.0` / `1.0`.
    pub stepped: bool,
}

impl ParamDescriptor {
    /// Descriptor with every field given except the keys.
    pub const fn custom(
        name: &'static str,
        short_name: &'static str,
        unit: ParamUnit,
        min: f32,
        max: f32,
        default: f32,
        step: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit,
            min,
            max,
            default,
            step,
            id: ParamId(0),
            string_id: "",
            stepped: false,
        }
    }

    /// Continuous parameter in `unit`, stepping by [`ParamUnit::step`].
    pub const fn ranged(
        unit: ParamUnit,
        label: (&'static str, &'static str),
        range: (f32, f32),
        default: f32,
    ) -> Self {
        Self::custom(label.0, label.1, unit, range.0, range.1, default, unit.step())
    }

    /// 0 to 100 percent.
    pub const fn percent(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self::ranged(ParamUnit::Percent, (name, short_name), (0.0, 100.0), default)
    }

    /// On/off switch.
    pub const fn toggle(name: &'static str, short_name: &'static str, default_on: bool) -> Self {
        let default = if default_on { 1.0 } else { 0.0 };
        let mut desc = Self::custom(name, short_name, ParamUnit::None, 0.0, 1.0, default, 1.0);
        desc.stepped = true;
        desc
    }

    /// Assigns both keys.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// `true` for on/off switches.
    #[inline]
    pub fn is_stepped(&self) -> bool {
        self.stepped
    }

    /// Clamps into `[min, max]`; NaN becomes the default.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Maps a plain value onto `[0, 1]`. A zero-width range maps to 0.
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let span = self.max - self.min;
        if span == 0.0 { 0.0 } else { (value - self.min) / span }
    }

    /// Inverse of [`normalize`](Self::normalize).
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        self.min + normalized * (self.max - self.min)
    }
}

/// Display unit of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// dB
    Decibels,
    /// ms
    Milliseconds,
    /// s
    Seconds,
    /// %
    Percent,
    /// Plain number.
    None,
}

impl ParamUnit {
    /// Suffix appended to formatted values, with its leading space if any.
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Decibels => " dB",
            Self::Milliseconds => " ms",
            Self::Seconds => " s",
            Self::Percent => "%",
            Self::None => "",
        }
    }

    /// Increment a continuous control in this unit moves by.
    pub const fn step(&self) -> f32 {
        match self {
            Self::Seconds => 0.1,
            Self::Decibels => 0.5,
            Self::Milliseconds | Self::Percent => 1.0,
            Self::None => 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Room {
        size: f32,
        freeze: f32,
    }

    impl ParameterInfo for Room {
        fn param_count(&self) -> usize {
            2
        }

        fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
            match index {
                0 => Some(
                    ParamDescriptor::ranged(ParamUnit::Seconds, ("Room Size", "Size"), (2.0, 20.0), 5.0)
                        .with_id(ParamId(10), "size"),
                ),
                1 => Some(ParamDescriptor::toggle("Freeze", "Freeze", false).with_id(ParamId(11), "freeze")),
                _ => None,
            }
        }

        fn get_param(&self, index: usize) -> f32 {
            match index {
                0 => self.size,
                1 => self.freeze,
                _ => 0.0,
            }
        }

        fn set_param(&mut self, index: usize, value: f32) {
            let Some(desc) = self.param_info(index) else {
                return;
            };
            let value = desc.clamp(value);
            if index == 0 {
                self.size = value;
            } else {
                self.freeze = value;
            }
        }
    }

    #[test]
    fn lookups() {
        let room = Room { size: 5.0, freeze: 0.0 };
        assert_eq!(room.find_param_by_name("room size"), Some(0));
        assert_eq!(room.find_param_by_name("FREEZE"), Some(1));
        assert_eq!(room.find_param_by_name("missing"), None);
        assert_eq!(room.find_param_by_string_id("freeze"), Some(1));
        assert_eq!(room.param_index_by_id(ParamId(10)), Some(0));
        assert_eq!(room.param_index_by_id(ParamId(99)), None);
    }

    #[test]
    fn normalized_writes_are_clamped() {
        let mut room = Room { size: 5.0, freeze: 0.0 };
        room.set_normalized(0, 0.5);
        assert!((room.get_param(0) - 11.0).abs() < 1e-5);
        room.set_normalized(0, 7.0);
        assert_eq!(room.get_param(0), 20.0);
        room.set_normalized(5, 0.5);
    }

    #[test]
    fn only_toggles_are_stepped() {
        let desc = ParamDescriptor::toggle("Bypass", "Bypass", true);
        assert!(desc.is_stepped());
        assert_eq!(desc.default, 1.0);
        assert!(!ParamDescriptor::percent("Damping", "Damp", 50.0).is_stepped());
    }

    #[test]
    fn nan_clamps_to_default() {
        let desc = ParamDescriptor::percent("Damping", "Damp", 50.0);
        assert_eq!(desc.clamp(f32::NAN), 50.0);
        assert_eq!(desc.clamp(-1.0), 0.0);
        assert_eq!(desc.clamp(101.0), 100.0);
    }

    #[test]
    fn zero_width_range_normalizes_to_zero() {
        let desc = ParamDescriptor::custom("Fixed", "Fixed", ParamUnit::None, 1.0, 1.0, 1.0, 0.0);
        assert_eq!(desc.normalize(1.0), 0.0);
        assert_eq!(ParamUnit::Percent.suffix(), "%");
        assert_eq!(ParamUnit::Seconds.step(), 0.1);
    }
}
