//! Configuration and persistence for the cathedral reverb.
//!
//! # Features
//!
//! - **Presets**: named parameter sets stored as TOML
//! - **Factory presets**: built-in starting points, always available
//! - **Validation**: range checks and `name=value` parsing with units
//! - **State**: the JSON blob a host saves and restores
//! - **Paths**: platform-specific preset and config directories
//!
//! # Example
//!
//! ```rust,no_run
//! use cathedral_config::{Preset, user_presets_dir};
//!
//! let hall = Preset::resolve("great_hall").unwrap();
//! let mut params = hall.reverb_params();
//! params.wet_mix = 0.3;
//!
//! let mine = Preset::from_params("Drier Hall", &params);
//! mine.save(user_presets_dir().join("drier_hall.toml")).unwrap();
//! ```

mod error;
mod preset;

/// Platform-specific paths for presets and configuration.
pub mod paths;

/// Parameter parsing and range validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

/// Persisted plugin state.
pub mod state;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use paths::{
    ensure_user_presets_dir, find_preset, list_system_presets, list_user_presets,
    preset_name_from_path, system_presets_dir, user_config_dir, user_presets_dir,
};
pub use preset::{Preset, PresetParams};
pub use state::{
    decode_state, encode_state, read_state_file, restore_or_default, restore_shared, save_shared,
    write_state_file,
};
pub use validation::{
    ValidationError, ValidationResult, parse_param_assignment, parse_param_value, resolve_param,
    validate_param, validate_preset,
};
