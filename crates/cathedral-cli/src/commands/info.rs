//! WAV metadata and what a render of the file would produce.

use cathedral_io::{WavFormat, WavInfo, read_wav_info};
use cathedral_reverb::ReverbEngine;
use clap::Args;
use std::path::PathBuf;

/// Display WAV file information.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the WAV file
    pub file: PathBuf,
}

pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let info = read_wav_info(&args.file)?;
    let size = std::fs::metadata(&args.file)?.len();

    println!("File:        {}", args.file.display());
    println!("Format:      {}", describe_format(&info));
    println!("Channels:    {}", info.channels);
    println!("Sample Rate: {} Hz", info.sample_rate);
    println!(
        "Duration:    {:.3}s ({} frames)",
        info.duration_secs, info.num_frames
    );
    println!("File Size:   {}", human_size(size));

    if ReverbEngine::supports_layout(usize::from(info.channels), 2) {
        let engine = ReverbEngine::new(info.sample_rate as f32, 1);
        println!("Reverb:      supported (renders to stereo)");
        println!(
            "  with tail: {:.3}s",
            info.duration_secs + f64::from(engine.tail_length_seconds())
        );
        println!("  comb delays (samples): {:?}", engine.comb_bank().delay_samples());
    } else {
        println!("Reverb:      unsupported (mono or stereo input only)");
    }

    Ok(())
}

fn describe_format(info: &WavInfo) -> String {
    let encoding = match info.format {
        WavFormat::Pcm => "PCM",
        WavFormat::IeeeFloat => "IEEE Float",
    };
    format!("{encoding} {}-bit", info.bits_per_sample)
}

fn human_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    match bytes {
        0..1024 => format!("{bytes} B"),
        1024..1_048_576 => format!("{:.1} KB", b / KIB),
        _ => format!("{:.1} MB", b / (KIB * KIB)),
    }
}
