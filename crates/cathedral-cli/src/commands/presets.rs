//! Preset management commands.
//!
//! Provides commands to list, show and save reverb presets.

use super::common::{format_value, load_preset, parse_override, resolve_params};
use cathedral_config::{
    Preset, ensure_user_presets_dir, factory_preset_names, get_factory_preset, is_factory_preset,
    list_system_presets, list_user_presets, preset_name_from_path, system_presets_dir,
    user_presets_dir, validate_preset,
};
use cathedral_reverb::ReverbParam;
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory, user and system)
    List {
        /// Show only factory presets
        #[arg(long, conflicts_with = "user")]
        factory: bool,

        /// Show only user and system presets
        #[arg(long)]
        user: bool,
    },

    /// Show the parameters of a preset
    Show {
        /// Preset name or path
        name: String,

        /// Print the preset as TOML
        #[arg(long)]
        toml: bool,
    },

    /// Save a parameter set as a user preset
    Save {
        /// Name for the new preset
        name: String,

        /// Preset to start from (defaults otherwise)
        #[arg(long, value_name = "PRESET")]
        from: Option<String>,

        /// Parameter override, repeatable (e.g. "decay=12s")
        #[arg(long = "param", value_name = "NAME=VALUE", value_parser = parse_override)]
        params: Vec<(ReverbParam, f32)>,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        /// Write to this file instead of the user presets directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite if the preset already exists
        #[arg(long)]
        force: bool,
    },

    /// Show preset directories
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => {
            list_presets(factory, user);
            Ok(())
        }
        PresetsCommand::Show { name, toml } => show_preset(&name, toml),
        PresetsCommand::Save {
            name,
            from,
            params,
            description,
            output,
            force,
        } => save_preset(
            &name,
            from.as_deref(),
            &params,
            description.as_deref(),
            output,
            force,
        ),
        PresetsCommand::Paths => {
            show_paths();
            Ok(())
        }
    }
}

fn list_presets(factory_only: bool, user_only: bool) {
    if !user_only {
        println!("Factory Presets:");
        println!("================");
        for id in factory_preset_names() {
            if let Some(preset) = get_factory_preset(id) {
                let desc = preset.description.as_deref().unwrap_or("");
                println!("  {:20} - {}", id, desc);
            }
        }
        println!();
    }

    if !factory_only {
        println!("User Presets:");
        println!("=============");
        let user_presets = list_user_presets();
        if user_presets.is_empty() {
            println!("  (none)");
            println!();
            println!("  Create a preset with: cathedral presets save <name> --param decay=8s\n");
        } else {
            print_preset_files(&user_presets);
            println!();
        }

        let system_presets = list_system_presets();
        if !system_presets.is_empty() {
            println!("System Presets:");
            println!("===============");
            print_preset_files(&system_presets);
            println!();
        }
    }
}

fn print_preset_files(paths: &[PathBuf]) {
    for path in paths {
        let name = preset_name_from_path(path).unwrap_or_else(|| "unknown".to_string());
        match Preset::load(path) {
            Ok(preset) => {
                let desc = preset.description.as_deref().unwrap_or("");
                println!("  {:20} - {}", name, desc);
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), "{e}");
                println!("  {:20} - (error loading)", name);
            }
        }
    }
}

fn show_preset(name: &str, as_toml: bool) -> anyhow::Result<()> {
    let preset = load_preset(name)?;

    if as_toml {
        print!("{}", preset.to_toml()?);
        return Ok(());
    }

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();

    if let Some(desc) = &preset.description {
        println!("Description: {}", desc);
        println!();
    }

    for (param, (key, value)) in ReverbParam::ALL.into_iter().zip(preset.params.entries()) {
        let desc = param.descriptor();
        let clamped = desc.clamp(value);
        let marker = if clamped == value || desc.is_stepped() {
            String::new()
        } else {
            format!("  (out of range, uses {})", format_value(desc, clamped))
        };
        println!("  {:10} = {}{}", key, format_value(desc, value), marker);
    }

    Ok(())
}

fn save_preset(
    name: &str,
    from: Option<&str>,
    overrides: &[(ReverbParam, f32)],
    description: Option<&str>,
    output: Option<PathBuf>,
    force: bool,
) -> anyhow::Result<()> {
    let path = match output {
        Some(path) => path,
        None => {
            if is_factory_preset(name) {
                tracing::warn!(
                    "'{name}' is a factory preset name; the user copy takes precedence when loading"
                );
            }
            ensure_user_presets_dir()?.join(format!("{}.toml", file_stem_for(name)))
        }
    };

    if path.exists() && !force {
        anyhow::bail!(
            "Preset file '{}' already exists. Use --force to overwrite.",
            path.display()
        );
    }

    let params = resolve_params(from, overrides)?;
    let mut preset = Preset::from_params(name, &params);
    if let Some(desc) = description {
        preset = preset.with_description(desc);
    }
    validate_preset(&preset)?;

    preset.save(&path)?;
    println!("Saved preset '{}' to {}", name, path.display());
    Ok(())
}

/// File stem for a preset name: lowercase, spaces become underscores.
fn file_stem_for(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn show_paths() {
    println!("Preset Directories:");
    println!("===================");
    print_dir("User", &user_presets_dir());
    print_dir("System", &system_presets_dir());
}

fn print_dir(label: &str, dir: &Path) {
    let status = if dir.exists() { "" } else { " (not created)" };
    println!("  {:7} {}{}", format!("{label}:"), dir.display(), status);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stems_are_filesystem_safe() {
        assert_eq!(file_stem_for("Great Hall"), "great_hall");
        assert_eq!(file_stem_for("  my-room_2 "), "my-room_2");
        assert_eq!(file_stem_for("a/b"), "a_b");
    }
}
