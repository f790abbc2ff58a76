//! Offline reverb rendering command.

use super::common::{linear_to_db, parse_override, resolve_params};
use anyhow::Context;
use cathedral_io::{OfflineRenderer, WavSpec, read_wav_stereo, write_wav_stereo};
use cathedral_reverb::ReverbParam;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file (mono or stereo)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file (always stereo)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset name or TOML file to start from
    #[arg(short, long)]
    preset: Option<String>,

    /// Parameter override, repeatable (e.g. "decay=8s", "predelay=120ms", "bypass=on")
    #[arg(long = "param", value_name = "NAME=VALUE", value_parser = parse_override)]
    params: Vec<(ReverbParam, f32)>,

    /// Reverb tail appended after the input, in seconds [default: 20]
    #[arg(long, value_name = "SECONDS", conflicts_with = "no_tail")]
    tail: Option<f32>,

    /// Render exactly the input length
    #[arg(long)]
    no_tail: bool,

    /// Use the vectorized filter path
    #[arg(long)]
    simd: bool,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if !matches!(args.bit_depth, 16 | 24 | 32) {
        anyhow::bail!("Unsupported bit depth {} (expected 16, 24 or 32)", args.bit_depth);
    }
    if args.block_size == 0 {
        anyhow::bail!("Block size must be at least 1");
    }

    let mut params = resolve_params(args.preset.as_deref(), &args.params)?;
    if args.simd {
        params.use_simd = true;
    }

    println!("Reading {}...", args.input.display());
    let (input, spec) = read_wav_stereo(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    println!(
        "  {} frames, {} ch, {} Hz, {:.2}s",
        input.len(),
        spec.channels,
        spec.sample_rate,
        input.len() as f32 / spec.sample_rate as f32
    );

    let mut renderer = OfflineRenderer::new(spec.sample_rate as f32, params)
        .with_block_size(args.block_size);
    if args.no_tail {
        renderer = renderer.with_tail_seconds(0.0);
    } else if let Some(tail) = args.tail {
        renderer = renderer.with_tail_seconds(tail);
    }

    println!(
        "Rendering: decay {:.1}s, pre-delay {:.0}ms, wet {:.2}{}",
        params.decay_time,
        params.pre_delay_ms,
        params.wet_mix,
        if params.bypass { " [BYPASSED]" } else { "" }
    );

    let pb = ProgressBar::new((input.len() + renderer.tail_frames()) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );
    let output = renderer.render(&input, usize::from(spec.channels), |done, _| {
        pb.set_position(done as u64);
    });
    pb.finish_with_message("done");

    println!("\nStats:");
    println!("  Input:  Peak {:.1} dB", linear_to_db(input.peak()));
    println!("  Output: Peak {:.1} dB", linear_to_db(output.peak()));
    if output.peak() > 1.0 {
        tracing::warn!(
            peak = output.peak(),
            "output exceeds full scale; integer formats will clip"
        );
    }

    let out_spec = WavSpec {
        channels: 2,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav_stereo(&args.output, &output, out_spec)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!("Done!");

    Ok(())
}
