//! Parameter listing.

use super::common::format_value;
use cathedral_reverb::{ParamUnit, ReverbParam, descriptors};
use clap::Args;

/// List reverb parameters.
#[derive(Args)]
pub struct ParamsArgs {
    /// Show a single parameter (string ID or name)
    pub name: Option<String>,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    if let Some(name) = args.name {
        let param = cathedral_config::resolve_param(&name)?;
        show_param(param);
        return Ok(());
    }

    println!("Reverb Parameters");
    println!("=================\n");
    println!(
        "  {:>3}  {:10} {:20} {:>18} {:>10}",
        "ID", "Key", "Name", "Range", "Default"
    );
    for desc in descriptors() {
        println!(
            "  {:>3}  {:10} {:20} {:>18} {:>10}",
            desc.id.0,
            desc.string_id,
            desc.name,
            range_text(desc.min, desc.max, desc.unit, desc.is_stepped()),
            format_value(desc, desc.default),
        );
    }
    println!("\nOverride with: cathedral process in.wav out.wav --param decay=8s");
    Ok(())
}

fn show_param(param: ReverbParam) {
    let desc = param.descriptor();
    println!("{} ({})", desc.name, desc.string_id);
    println!("  ID:      {}", desc.id.0);
    println!("  Short:   {}", desc.short_name);
    println!(
        "  Range:   {}",
        range_text(desc.min, desc.max, desc.unit, desc.is_stepped())
    );
    println!("  Default: {}", format_value(desc, desc.default));
    if !desc.is_stepped() {
        println!("  Step:    {}", desc.step);
    }
}

fn range_text(min: f32, max: f32, unit: ParamUnit, stepped: bool) -> String {
    if stepped {
        "off/on".to_string()
    } else {
        format!("{min} - {max}{}", unit.suffix())
    }
}
