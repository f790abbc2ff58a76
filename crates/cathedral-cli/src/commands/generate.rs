//! Test signal generation command.
//!
//! Impulses are the usual way to audition a reverb: render one through
//! `cathedral process` and the output is the room's impulse response.

use cathedral_io::{WavSpec, write_wav};
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate a single-sample impulse followed by silence
    Impulse {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "1.0")]
        amplitude: f32,
    },

    /// Generate white noise
    Noise {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.5")]
        amplitude: f32,

        /// Seed for the noise generator
        #[arg(long, default_value = "305419896")]
        seed: u32,
    },

    /// Generate a sine tone
    Sine {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value = "440.0")]
        freq: f32,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.5")]
        amplitude: f32,
    },
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let (output, sample_rate, samples) = match args.command {
        GenerateCommand::Impulse {
            output,
            duration,
            sample_rate,
            amplitude,
        } => {
            println!("Generating impulse...");
            let samples = impulse(frames(duration, sample_rate), amplitude);
            (output, sample_rate, samples)
        }

        GenerateCommand::Noise {
            output,
            duration,
            sample_rate,
            amplitude,
            seed,
        } => {
            println!("Generating white noise...");
            println!("  {:.2}s at {} Hz", duration, sample_rate);
            let samples = white_noise(frames(duration, sample_rate), amplitude, seed);
            (output, sample_rate, samples)
        }

        GenerateCommand::Sine {
            output,
            freq,
            duration,
            sample_rate,
            amplitude,
        } => {
            println!("Generating sine tone...");
            println!("  {} Hz for {:.2}s", freq, duration);
            let samples = sine(frames(duration, sample_rate), freq, sample_rate, amplitude);
            (output, sample_rate, samples)
        }
    };

    if sample_rate == 0 {
        anyhow::bail!("Sample rate must be greater than zero");
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
    };
    write_wav(&output, &samples, spec)?;
    println!("Wrote {} samples to {}", samples.len(), output.display());
    Ok(())
}

fn frames(duration: f32, sample_rate: u32) -> usize {
    (f64::from(duration.max(0.0)) * f64::from(sample_rate)).round() as usize
}

fn impulse(len: usize, amplitude: f32) -> Vec<f32> {
    let mut samples = vec![0.0; len];
    if let Some(first) = samples.first_mut() {
        *first = amplitude;
    }
    samples
}

/// Xorshift32 white noise in `[-amplitude, amplitude]`.
fn white_noise(len: usize, amplitude: f32, seed: u32) -> Vec<f32> {
    // A zero state never leaves zero.
    let mut state = if seed == 0 { 0x1234_5678 } else { seed };
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state as i32 as f32) / (i32::MAX as f32) * amplitude
        })
        .collect()
}

fn sine(len: usize, freq: f32, sample_rate: u32, amplitude: f32) -> Vec<f32> {
    let step = std::f64::consts::TAU * f64::from(freq) / f64::from(sample_rate.max(1));
    (0..len)
        .map(|i| ((step * i as f64).sin() as f32) * amplitude)
        .collect()
}
