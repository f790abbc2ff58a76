//! Parameter parsing and range validation.
//!
//! Presets and command-line overrides name parameters by string ID
//! (`decay`, `predelay`, ...) or display name, with an optional unit suffix.
//!
//! # Example
//!
//! ```rust
//! use cathedral_config::{parse_param_assignment, validate_param};
//! use cathedral_reverb::ReverbParam;
//!
//! let (param, value) = parse_param_assignment("predelay=120ms").unwrap();
//! assert_eq!(param, ReverbParam::PreDelay);
//! assert_eq!(value, 120.0);
//!
//! assert!(validate_param(ReverbParam::Decay, 40.0).is_err());
//! ```

use cathedral_reverb::ReverbParam;
use thiserror::Error;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Unknown parameter name.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// String ID of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Invalid parameter format.
    #[error("invalid format for parameter '{param}': {reason}")]
    InvalidFormat {
        /// Name of the parameter.
        param: String,
        /// Description of the format error.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Resolves a parameter by string ID or display name, case-insensitively.
pub fn resolve_param(name: &str) -> ValidationResult<ReverbParam> {
    let key = name.trim().to_lowercase();
    ReverbParam::ALL
        .into_iter()
        .find(|p| {
            let desc = p.descriptor();
            desc.string_id == key
                || desc.name.to_lowercase() == key
                || desc.short_name.to_lowercase() == key
        })
        .ok_or_else(|| ValidationError::UnknownParameter(name.trim().to_string()))
}

/// Parses a value for `param_name`.
///
/// Accepts plain numbers, numbers with a unit suffix (`ms`, `s`, `dB`, `%`)
/// and, for switches, `on`/`off`/`true`/`false`. Seconds are converted to
/// milliseconds when the parameter is in milliseconds and vice versa; other
/// suffixes are stripped without conversion.
pub fn parse_param_value(param_name: &str, value_str: &str) -> ValidationResult<f32> {
    let param = resolve_param(param_name)?;
    let s = value_str.trim();

    if param.is_toggle() {
        match s.to_lowercase().as_str() {
            "on" | "true" | "yes" => return Ok(1.0),
            "off" | "false" | "no" => return Ok(0.0),
            _ => {}
        }
    }

    let unit_is_ms = param == ReverbParam::PreDelay;
    let (number, convert): (&str, fn(f32) -> f32) = if let Some(v) = s.strip_suffix("ms") {
        (v, if unit_is_ms { identity } else { ms_to_seconds })
    } else if let Some(v) = s.strip_suffix('s') {
        (v, if unit_is_ms { seconds_to_ms } else { identity })
    } else if let Some(v) = s.strip_suffix("dB").or_else(|| s.strip_suffix("db")) {
        (v, identity)
    } else if let Some(v) = s.strip_suffix('%') {
        (v, identity)
    } else {
        (s, identity)
    };

    number
        .trim()
        .parse::<f32>()
        .map(convert)
        .map_err(|_| ValidationError::InvalidFormat {
            param: param.string_id().to_string(),
            reason: format!("cannot parse '{}' as number", value_str.trim()),
        })
}

fn identity(v: f32) -> f32 {
    v
}

fn ms_to_seconds(v: f32) -> f32 {
    v / 1000.0
}

fn seconds_to_ms(v: f32) -> f32 {
    v * 1000.0
}

/// Parses a `name=value` override such as `decay=8s` or `bypass=on`.
pub fn parse_param_assignment(assignment: &str) -> ValidationResult<(ReverbParam, f32)> {
    let Some((name, value)) = assignment.split_once('=') else {
        return Err(ValidationError::InvalidFormat {
            param: assignment.trim().to_string(),
            reason: "expected name=value".to_string(),
        });
    };
    let param = resolve_param(name)?;
    let value = parse_param_value(name, value)?;
    Ok((param, value))
}

/// Checks that `value` lies within `param`'s range.
pub fn validate_param(param: ReverbParam, value: f32) -> ValidationResult<()> {
    let desc = param.descriptor();
    if value.is_finite() && value >= desc.min && value <= desc.max {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            param: desc.string_id.to_string(),
            value,
            min: desc.min,
            max: desc.max,
        })
    }
}

/// Checks every parameter of a preset, collecting all failures.
///
/// ```rust
/// use cathedral_config::{Preset, validate_preset};
///
/// let mut preset = Preset::new("Too long");
/// preset.params.decay = 60.0;
/// assert!(validate_preset(&preset).is_err());
/// ```
pub fn validate_preset(preset: &crate::Preset) -> ValidationResult<()> {
    let mut errors: Vec<ValidationError> = ReverbParam::ALL
        .into_iter()
        .zip(preset.params.entries())
        .filter_map(|(param, (_, value))| validate_param(param, value).err())
        .collect();

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
