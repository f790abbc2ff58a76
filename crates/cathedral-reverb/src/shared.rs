//! Lock-free parameter store shared between control and audio contexts.
//!
//! `SharedParams` lives as long as any clone of it. The control side (UI,
//! automation, preset loading) writes values; the audio side takes a
//! [`snapshot`](SharedParams::snapshot) once per block. Every value is an
//! `f32` bit-cast into an `AtomicU32`, so a read can neither block nor tear.
//! The CPU-usage ratio travels the other way through the same mechanism.

use crate::params::{PARAM_COUNT, ReverbParam, ReverbParams, descriptors};
use cathedral_core::{ParamDescriptor, ParameterInfo};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

struct SharedData {
    values: [AtomicU32; PARAM_COUNT],
    cpu_usage: AtomicU32,
}

/// Cheaply clonable handle to the current parameter values.
///
/// ```rust
/// use cathedral_reverb::{ReverbParam, SharedParams};
///
/// let shared = SharedParams::new();
/// let audio_side = shared.clone();
///
/// shared.set(ReverbParam::Wet, 0.8);
/// assert_eq!(audio_side.snapshot().wet_mix, 0.8);
/// ```
#[derive(Clone)]
pub struct SharedParams {
    inner: Arc<SharedData>,
}

impl core::fmt::Debug for SharedParams {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedParams")
            .field("params", &self.snapshot())
            .field("cpu_usage", &self.cpu_usage())
            .finish()
    }
}

impl Default for SharedParams {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedParams {
    /// Creates a store holding the default parameter values.
    pub fn new() -> Self {
        Self::from_params(&ReverbParams::default())
    }

    /// Creates a store holding `params` (clamped).
    pub fn from_params(params: &ReverbParams) -> Self {
        let values = params.clamped().to_values();
        Self {
            inner: Arc::new(SharedData {
                values: values.map(|v| AtomicU32::new(v.to_bits())),
                cpu_usage: AtomicU32::new(0.0f32.to_bits()),
            }),
        }
    }

    /// Reads one parameter.
    pub fn get(&self, param: ReverbParam) -> f32 {
        f32::from_bits(self.inner.values[param.index()].load(Ordering::Acquire))
    }

    /// Writes one parameter, clamped to its range. Switches are stored as
    /// `0.0` / `1.0`.
    pub fn set(&self, param: ReverbParam, value: f32) {
        let desc = param.descriptor();
        let mut value = desc.clamp(value);
        if desc.is_stepped() {
            value = if value >= 0.5 { 1.0 } else { 0.0 };
        }
        self.inner.values[param.index()].store(value.to_bits(), Ordering::Release);
    }

    /// Reads a parameter by index, `None` if out of range.
    pub fn get_value(&self, index: usize) -> Option<f32> {
        ReverbParam::from_index(index).map(|p| self.get(p))
    }

    /// Writes a parameter by index. Out-of-range indices are ignored.
    pub fn set_value(&self, index: usize, value: f32) {
        if let Some(param) = ReverbParam::from_index(index) {
            self.set(param, value);
        }
    }

    /// Loads every parameter into a plain snapshot.
    pub fn snapshot(&self) -> ReverbParams {
        let values = ReverbParam::ALL.map(|p| self.get(p));
        ReverbParams::from_values(&values)
    }

    /// Stores every field of `params`.
    pub fn store(&self, params: &ReverbParams) {
        for (param, value) in ReverbParam::ALL.into_iter().zip(params.to_values()) {
            self.set(param, value);
        }
    }

    /// Puts every parameter back to its default.
    pub fn reset_to_defaults(&self) {
        self.store(&ReverbParams::default());
    }

    /// Last CPU-usage ratio published by the audio side.
    pub fn cpu_usage(&self) -> f32 {
        f32::from_bits(self.inner.cpu_usage.load(Ordering::Acquire))
    }

    /// Publishes a CPU-usage ratio.
    pub fn publish_cpu_usage(&self, ratio: f32) {
        self.inner.cpu_usage.store(ratio.to_bits(), Ordering::Release);
    }

    /// All parameter descriptors.
    pub fn descriptors(&self) -> &'static [ParamDescriptor] {
        descriptors()
    }
}

impl ParameterInfo for SharedParams {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        descriptors().get(index).copied()
    }

    fn get_param(&self, index: usize) -> f32 {
        self.get_value(index).unwrap_or(0.0)
    }

    fn set_param(&mut self, index: usize, value: f32) {
        self.set_value(index, value);
    }
}
