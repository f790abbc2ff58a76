//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use cathedral_config::{Preset, parse_param_assignment, validate_param, validate_preset};
use cathedral_reverb::{ParamDescriptor, ParamUnit, ReverbParam, ReverbParams};

/// Parse a `name=value` override for clap's `value_parser`.
pub fn parse_override(s: &str) -> Result<(ReverbParam, f32), String> {
    parse_param_assignment(s).map_err(|e| e.to_string())
}

/// Load a preset by file path, user/system preset name or factory name.
pub fn load_preset(name: &str) -> anyhow::Result<Preset> {
    Preset::resolve(name).with_context(|| {
        format!("could not load preset '{name}'. Use 'cathedral presets list' to see available presets")
    })
}

/// Builds the parameter set from an optional preset plus overrides.
///
/// Out-of-range values are reported with a warning and clamped.
pub fn resolve_params(
    preset: Option<&str>,
    overrides: &[(ReverbParam, f32)],
) -> anyhow::Result<ReverbParams> {
    let mut params = match preset {
        Some(name) => {
            let preset = load_preset(name)?;
            if let Err(e) = validate_preset(&preset) {
                tracing::warn!(preset = %preset.name, "{e}; clamping into range");
            }
            tracing::info!(preset = %preset.name, "loaded preset");
            preset.reverb_params()
        }
        None => ReverbParams::default(),
    };

    for &(param, value) in overrides {
        if let Err(e) = validate_param(param, value) {
            tracing::warn!("{e}; clamping into range");
        }
        params.set(param, value);
    }
    Ok(params)
}

/// Formats a value with its unit, switches as `on`/`off`.
pub fn format_value(desc: &ParamDescriptor, value: f32) -> String {
    if desc.is_stepped() {
        return if value >= 0.5 { "on" } else { "off" }.to_string();
    }
    match desc.unit {
        ParamUnit::Milliseconds | ParamUnit::Percent => {
            format!("{:.0}{}", value, desc.unit.suffix())
        }
        _ => format!("{:.2}{}", value, desc.unit.suffix()),
    }
}

/// Converts a linear peak to dBFS, floored at -120.
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -120.0
    } else {
        20.0 * linear.log10()
    }
}
