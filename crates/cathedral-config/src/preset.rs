//! Preset file format and operations.

use cathedral_reverb::{PARAM_COUNT, ReverbParams};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Parameter table of a preset, keyed by the parameters' string IDs.
///
/// Values are kept exactly as written in the file. Missing keys take the
/// reverb's defaults; [`PresetParams::to_params`] clamps into range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PresetParams {
    /// Decay time in seconds.
    pub decay: f32,
    /// Pre-delay in milliseconds.
    pub predelay: f32,
    /// Damping in percent.
    pub damping: f32,
    /// Diffusion amount.
    pub diffusion: f32,
    /// Hi-cut in dB.
    pub hicut: f32,
    /// Bass multiply.
    pub bassmult: f32,
    /// Wet mix.
    pub wet: f32,
    /// Bypass switch.
    pub bypass: bool,
    /// Vectorized path switch.
    pub simd: bool,
}

impl Default for PresetParams {
    fn default() -> Self {
        Self::from_params(&ReverbParams::default())
    }
}

impl PresetParams {
    /// Copies a runtime parameter set.
    pub fn from_params(params: &ReverbParams) -> Self {
        Self {
            decay: params.decay_time,
            predelay: params.pre_delay_ms,
            damping: params.damping_pct,
            diffusion: params.diffusion,
            hicut: params.hi_cut_db,
            bassmult: params.bass_mult,
            wet: params.wet_mix,
            bypass: params.bypass,
            simd: params.use_simd,
        }
    }

    /// Converts to a runtime parameter set, clamping every value.
    pub fn to_params(&self) -> ReverbParams {
        self.unclamped().clamped()
    }

    /// Numeric values paired with their string IDs, in parameter order.
    pub fn entries(&self) -> [(&'static str, f32); PARAM_COUNT] {
        [
            ("decay", self.decay),
            ("predelay", self.predelay),
            ("damping", self.damping),
            ("diffusion", self.diffusion),
            ("hicut", self.hicut),
            ("bassmult", self.bassmult),
            ("wet", self.wet),
            ("bypass", if self.bypass { 1.0 } else { 0.0 }),
            ("simd", if self.simd { 1.0 } else { 0.0 }),
        ]
    }

    fn unclamped(&self) -> ReverbParams {
        ReverbParams {
            decay_time: self.decay,
            pre_delay_ms: self.predelay,
            damping_pct: self.damping,
            diffusion: self.diffusion,
            hi_cut_db: self.hicut,
            bass_mult: self.bassmult,
            wet_mix: self.wet,
            bypass: self.bypass,
            use_simd: self.simd,
        }
    }
}

/// A named reverb setting.
///
/// # TOML Format
///
/// ```toml
/// name = "Great Hall"
/// description = "Long, dark and wide"
///
/// [params]
/// decay = 9.0
/// predelay = 80.0
/// damping = 40.0
/// wet = 0.45
/// ```
///
/// Every key under `[params]` is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parameter values.
    #[serde(default)]
    pub params: PresetParams,
}

impl Preset {
    /// Create a preset holding the default parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: PresetParams::default(),
        }
    }

    /// Create a preset from a runtime parameter set.
    pub fn from_params(name: impl Into<String>, params: &ReverbParams) -> Self {
        Self {
            params: PresetParams::from_params(params),
            ..Self::new(name)
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the parameter table.
    pub fn with_params(mut self, params: &ReverbParams) -> Self {
        self.params = PresetParams::from_params(params);
        self
    }

    /// Runtime parameters, clamped into range.
    pub fn reverb_params(&self) -> ReverbParams {
        self.params.to_params()
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), name = %preset.name, "loaded preset");
        Ok(preset)
    }

    /// Finds a preset by file path, user or system preset name, or factory
    /// preset name, in that order.
    pub fn resolve(name: &str) -> Result<Self, ConfigError> {
        if let Some(path) = crate::paths::find_preset(name) {
            return Self::load(path);
        }
        crate::factory_presets::get_factory_preset(name)
            .ok_or_else(|| ConfigError::PresetNotFound(name.to_string()))
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), name = %self.name, "saved preset");
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
