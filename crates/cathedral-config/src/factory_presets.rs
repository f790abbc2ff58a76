//! Factory presets bundled with the library.
//!
//! These are embedded at compile time and always available without any
//! files on disk. `cathedral` is the plain default setting; the others are
//! starting points for common spaces.

use crate::Preset;

/// Array of factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "cathedral",
    "chapel",
    "great_hall",
    "crypt",
    "bright_nave",
    "infinite_nave",
];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("cathedral", CATHEDRAL_PRESET),
    ("chapel", CHAPEL_PRESET),
    ("great_hall", GREAT_HALL_PRESET),
    ("crypt", CRYPT_PRESET),
    ("bright_nave", BRIGHT_NAVE_PRESET),
    ("infinite_nave", INFINITE_NAVE_PRESET),
];

const CATHEDRAL_PRESET: &str = r#"
name = "Cathedral"
description = "Default setting: five second stone room"

[params]
decay = 5.0
predelay = 50.0
damping = 50.0
diffusion = 10.0
hicut = 0.0
bassmult = 0.0
wet = 0.5
"#;

const CHAPEL_PRESET: &str = r#"
name = "Chapel"
description = "Small, close and soft"

[params]
decay = 2.5
predelay = 15.0
damping = 60.0
diffusion = 8.0
hicut = 3.0
bassmult = 0.0
wet = 0.3
"#;

const GREAT_HALL_PRESET: &str = r#"
name = "Great Hall"
description = "Long, dark and wide"

[params]
decay = 9.0
predelay = 80.0
damping = 40.0
diffusion = 14.0
hicut = 2.0
bassmult = 2.0
wet = 0.45
"#;

const CRYPT_PRESET: &str = r#"
name = "Crypt"
description = "Low ceiling, heavy damping, dense early field"

[params]
decay = 4.0
predelay = 5.0
damping = 85.0
diffusion = 18.0
hicut = 12.0
bassmult = 4.0
wet = 0.6
"#;

const BRIGHT_NAVE_PRESET: &str = r#"
name = "Bright Nave"
description = "Glassy highs with little damping"

[params]
decay = 7.0
predelay = 35.0
damping = 10.0
diffusion = 12.0
hicut = 0.0
bassmult = -3.0
wet = 0.4
"#;

const INFINITE_NAVE_PRESET: &str = r#"
name = "Infinite Nave"
description = "Maximum decay for pads and drones"

[params]
decay = 20.0
predelay = 120.0
damping = 30.0
diffusion = 20.0
hicut = 6.0
bassmult = 1.0
wet = 0.7
simd = true
"#;

/// All factory presets, in [`FACTORY_PRESET_NAMES`] order.
///
/// ```rust
/// use cathedral_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("{}: {}", preset.name, preset.description.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by internal or display name, case-insensitively.
///
/// ```rust
/// use cathedral_config::get_factory_preset;
///
/// let hall = get_factory_preset("Great Hall").unwrap();
/// assert_eq!(hall.reverb_params().decay_time, 9.0);
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let name_lower = name.to_lowercase();

    for (preset_name, toml) in FACTORY_PRESETS_TOML {
        if *preset_name == name_lower {
            return Preset::from_toml(toml).ok();
        }
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == name_lower)
}

/// Internal identifiers of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESET_NAMES.to_vec()
}

/// Whether `name` matches a factory preset (case-insensitive).
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
