//! Persisted plugin state.
//!
//! A host saves the reverb as an opaque byte blob and hands it back on
//! reload. The blob is a JSON object keyed by parameter string ID, with
//! switches stored as `0.0` / `1.0`:
//!
//! ```json
//! {"decay":5.0,"predelay":50.0,"damping":50.0,"diffusion":10.0,"hicut":0.0,
//!  "bassmult":0.0,"wet":0.5,"bypass":0.0,"simd":0.0}
//! ```
//!
//! The parameter values are the whole persistent state; nothing else about
//! the engine is saved.

use cathedral_reverb::{ReverbParam, ReverbParams, SharedParams};
use serde_json::{Map, Value};
use std::path::Path;

use crate::error::ConfigError;

/// Serializes `params` into a state blob.
pub fn encode_state(params: &ReverbParams) -> Result<Vec<u8>, ConfigError> {
    let map: Map<String, Value> = ReverbParam::ALL
        .into_iter()
        .map(|param| (param.string_id().to_string(), Value::from(params.get(param))))
        .collect();
    Ok(serde_json::to_vec(&Value::Object(map))?)
}

/// Decodes a state blob.
///
/// Unknown keys are ignored, missing or non-numeric keys keep their
/// defaults, and every value is clamped into range. Fails only when the
/// blob is not a non-empty JSON object.
pub fn decode_state(blob: &[u8]) -> Result<ReverbParams, ConfigError> {
    let value: Value = serde_json::from_slice(blob)?;
    let Value::Object(map) = value else {
        return Err(ConfigError::StateFormat("expected a JSON object".to_string()));
    };
    if map.is_empty() {
        return Err(ConfigError::StateFormat("no parameters present".to_string()));
    }

    let mut params = ReverbParams::default();
    for param in ReverbParam::ALL {
        let Some(raw) = map.get(param.string_id()) else {
            continue;
        };
        match raw {
            Value::Number(n) => {
                if let Some(v) = n.as_f64() {
                    params.set(param, v as f32);
                }
            }
            Value::Bool(b) => params.set(param, if *b { 1.0 } else { 0.0 }),
            _ => tracing::debug!(key = param.string_id(), "ignoring non-numeric state value"),
        }
    }
    Ok(params)
}

/// Decodes a blob, falling back to defaults when it is missing or unusable.
///
/// ```rust
/// use cathedral_config::restore_or_default;
/// use cathedral_reverb::ReverbParams;
///
/// assert_eq!(restore_or_default(None), ReverbParams::default());
/// assert_eq!(restore_or_default(Some(&b"garbage"[..])), ReverbParams::default());
///
/// let restored = restore_or_default(Some(&br#"{"decay": 11.0}"#[..]));
/// assert_eq!(restored.decay_time, 11.0);
/// ```
pub fn restore_or_default(blob: Option<&[u8]>) -> ReverbParams {
    let Some(blob) = blob else {
        tracing::warn!("no saved state, using default parameters");
        return ReverbParams::default();
    };
    decode_state(blob).unwrap_or_else(|err| {
        tracing::warn!(%err, "saved state unusable, using default parameters");
        ReverbParams::default()
    })
}

/// Captures the current values of a shared parameter store.
pub fn save_shared(shared: &SharedParams) -> Result<Vec<u8>, ConfigError> {
    encode_state(&shared.snapshot())
}

/// Restores a shared parameter store from a blob, falling back to defaults.
pub fn restore_shared(shared: &SharedParams, blob: Option<&[u8]>) {
    shared.store(&restore_or_default(blob));
}

/// Writes a state blob to `path`.
pub fn write_state_file(path: impl AsRef<Path>, params: &ReverbParams) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let blob = encode_state(params)?;
    std::fs::write(path, blob).map_err(|e| ConfigError::write_file(path, e))
}

/// Reads a state blob from `path`. Decoding follows [`decode_state`].
pub fn read_state_file(path: impl AsRef<Path>) -> Result<ReverbParams, ConfigError> {
    let path = path.as_ref();
    let blob = std::fs::read(path).map_err(|e| ConfigError::read_file(path, e))?;
    decode_state(&blob)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReverbParams {
        ReverbParams {
            decay_time: 12.5,
            pre_delay_ms: 210.0,
            damping_pct: 33.0,
            diffusion: 4.0,
            hi_cut_db: 18.0,
            bass_mult: -2.5,
            wet_mix: 0.9,
            bypass: true,
            use_simd: true,
        }
    }

    #[test]
    fn encode_then_decode_restores_every_value() {
        let blob = encode_state(&sample()).unwrap();
        assert_eq!(decode_state(&blob).unwrap(), sample());
    }

    #[test]
    fn blob_is_keyed_by_string_id() {
        let blob = encode_state(&ReverbParams::default()).unwrap();
        let value: Value = serde_json::from_slice(&blob).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 9);
        assert_eq!(map["decay"], 5.0f64);
        assert_eq!(map["bypass"], 0.0f64);
    }

    #[test]
    fn unknown_keys_ignored_and_missing_keys_defaulted() {
        let params = decode_state(br#"{"wet": 0.25, "room_size": 3, "simd": true}"#).unwrap();
        assert_eq!(params.wet_mix, 0.25);
        assert!(params.use_simd);
        assert_eq!(params.decay_time, 5.0);
    }

    #[test]
    fn values_are_clamped() {
        let params = decode_state(br#"{"decay": 900, "predelay": -5, "bypass": 0.7}"#).unwrap();
        assert_eq!(params.decay_time, 20.0);
        assert_eq!(params.pre_delay_ms, 0.0);
        assert!(params.bypass);
    }

    #[test]
    fn non_numeric_values_keep_defaults() {
        let params = decode_state(br#"{"decay": "long", "wet": null}"#).unwrap();
        assert_eq!(params, ReverbParams::default());
    }

    #[test]
    fn malformed_blobs_are_rejected() {
        let blobs: [&[u8]; 5] = [b"", b"[1,2,3]", b"{}", b"{\"decay\":", b"42"];
        for blob in blobs {
            assert!(
                matches!(decode_state(blob), Err(ConfigError::StateFormat(_))),
                "{:?}",
                String::from_utf8_lossy(blob)
            );
        }
    }

    #[test]
    fn restore_falls_back_to_defaults() {
        assert_eq!(restore_or_default(Some(&b"{}"[..])), ReverbParams::default());
        let blob = encode_state(&sample()).unwrap();
        assert_eq!(restore_or_default(Some(blob.as_slice())), sample());
    }

    #[test]
    fn shared_store_roundtrip() {
        let shared = SharedParams::from_params(&sample());
        let blob = save_shared(&shared).unwrap();

        let other = SharedParams::new();
        restore_shared(&other, Some(blob.as_slice()));
        assert_eq!(other.snapshot(), sample());

        restore_shared(&other, None);
        assert_eq!(other.snapshot(), ReverbParams::default());
    }
}
