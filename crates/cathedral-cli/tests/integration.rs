//! Integration tests for cathedral-cli.
//!
//! Tests run the `cathedral` binary end to end: listing, preset files, WAV
//! inspection and rendering.

use cathedral_io::{StereoSamples, WavSpec, read_wav_stereo, write_wav, write_wav_stereo};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper to get the path to the `cathedral` binary built by cargo.
fn cathedral_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cathedral"))
}

fn run(args: &[&str]) -> Output {
    cathedral_bin()
        .args(args)
        .output()
        .expect("failed to run cathedral")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp path is not UTF-8")
}

fn write_impulse(path: &Path, frames: usize) {
    let mut samples = vec![0.0f32; frames];
    samples[0] = 1.0;
    write_wav(path, &samples, WavSpec::default()).unwrap();
}

// ---------------------------------------------------------------------------
// Help and listings
// ---------------------------------------------------------------------------

#[test]
fn cli_help_lists_commands() {
    let output = run(&["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Cathedral reverb CLI"));
    for command in ["process", "params", "presets", "info", "generate"] {
        assert!(stdout.contains(command), "help should mention '{command}'");
    }
}

#[test]
fn cli_version_works() {
    let output = run(&["--version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("cathedral"));
}

#[test]
fn cli_params_lists_every_parameter() {
    let output = run(&["params"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for key in [
        "decay",
        "predelay",
        "damping",
        "diffusion",
        "hicut",
        "bassmult",
        "wet",
        "bypass",
        "simd",
    ] {
        assert!(stdout.contains(key), "params listing should contain '{key}'");
    }
    assert!(stdout.contains("0 - 500 ms"));
}

#[test]
fn cli_params_detail_and_unknown() {
    let output = run(&["params", "Pre-Delay"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("predelay"));
    assert!(stdout.contains("101"));

    let output = run(&["params", "room_size"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("room_size"));
}

#[test]
fn cli_presets_list_shows_factory_presets() {
    let output = run(&["presets", "list", "--factory"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in [
        "cathedral",
        "chapel",
        "great_hall",
        "crypt",
        "bright_nave",
        "infinite_nave",
    ] {
        assert!(stdout.contains(name), "missing factory preset '{name}'");
    }
}

#[test]
fn cli_presets_show_factory() {
    let output = run(&["presets", "show", "great_hall"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Great Hall"));
    assert!(stdout.contains("decay"));

    let output = run(&["presets", "show", "nowhere_at_all"]);
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// Preset files
// ---------------------------------------------------------------------------

#[test]
fn cli_presets_save_to_file_and_reuse() {
    let temp = TempDir::new().unwrap();
    let preset_path = temp.path().join("presets").join("dry_vault.toml");

    let output = run(&[
        "presets",
        "save",
        "Dry Vault",
        "--from",
        "crypt",
        "--param",
        "wet=0.2",
        "--param",
        "predelay=100ms",
        "--description",
        "mostly dry",
        "--output",
        path_str(&preset_path),
    ]);
    assert!(
        output.status.success(),
        "save failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let saved = cathedral_config::Preset::load(&preset_path).unwrap();
    assert_eq!(saved.name, "Dry Vault");
    assert_eq!(saved.description.as_deref(), Some("mostly dry"));
    assert_eq!(saved.params.wet, 0.2);
    assert_eq!(saved.params.predelay, 100.0);

    // Saving again without --force refuses to overwrite.
    let output = run(&[
        "presets",
        "save",
        "Dry Vault",
        "--output",
        path_str(&preset_path),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--force"));

    // The file drives a render.
    let input = temp.path().join("in.wav");
    let rendered = temp.path().join("out.wav");
    write_impulse(&input, 480);
    let output = run(&[
        "process",
        path_str(&input),
        path_str(&rendered),
        "--preset",
        path_str(&preset_path),
        "--no-tail",
    ]);
    assert!(output.status.success());
    let (samples, _) = read_wav_stereo(&rendered).unwrap();
    // The pre-delay outlasts the input, so only the dry signal is heard.
    assert!((samples.left[0] - 0.8).abs() < 1e-6);
    assert!((samples.right[0] - 0.8).abs() < 1e-6);
}

// ---------------------------------------------------------------------------
// Info and generate
// ---------------------------------------------------------------------------

#[test]
fn cli_info_shows_wav_metadata() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("tone.wav");
    let spec = WavSpec {
        channels: 2,
        sample_rate: 44100,
        bits_per_sample: 16,
    };
    write_wav_stereo(&path, &StereoSamples::from_mono(vec![0.1; 4410]), spec).unwrap();

    let output = run(&["info", path_str(&path)]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("PCM 16-bit"));
    assert!(stdout.contains("Channels:    2"));
    assert!(stdout.contains("44100 Hz"));
    assert!(stdout.contains("4410 frames"));
    assert!(stdout.contains("supported (renders to stereo)"));
}

#[test]
fn cli_generate_signals() {
    let temp = TempDir::new().unwrap();

    let impulse = temp.path().join("impulse.wav");
    let output = run(&[
        "generate",
        "impulse",
        path_str(&impulse),
        "--duration",
        "0.5",
        "--sample-rate",
        "44100",
    ]);
    assert!(output.status.success());
    let (samples, spec) = read_wav_stereo(&impulse).unwrap();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(samples.len(), 22050);
    assert_eq!(samples.left[0], 1.0);

    let noise = temp.path().join("noise.wav");
    let output = run(&["generate", "noise", path_str(&noise), "--duration", "0.1"]);
    assert!(output.status.success());
    let (samples, _) = read_wav_stereo(&noise).unwrap();
    assert_eq!(samples.len(), 4800);
    assert!(samples.peak() <= 0.5);
    assert!(samples.peak() > 0.0);

    let sine = temp.path().join("sine.wav");
    let output = run(&[
        "generate",
        "sine",
        path_str(&sine),
        "--freq",
        "1000",
        "--duration",
        "0.01",
    ]);
    assert!(output.status.success());
    let (samples, _) = read_wav_stereo(&sine).unwrap();
    assert_eq!(samples.len(), 480);
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[test]
fn cli_process_appends_tail_and_writes_stereo() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("dry.wav");
    let rendered = temp.path().join("wet.wav");
    write_impulse(&input, 4800);

    let output = run(&[
        "process",
        path_str(&input),
        path_str(&rendered),
        "--param",
        "predelay=10ms",
        "--param",
        "wet=1",
        "--tail",
        "0.5",
        "--bit-depth",
        "24",
    ]);
    assert!(
        output.status.success(),
        "process failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let (samples, spec) = read_wav_stereo(&rendered).unwrap();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.bits_per_sample, 24);
    assert_eq!(samples.len(), 4800 + 24000);
    // Fully wet: nothing before the pre-delay, mirrored channels after it.
    assert!(samples.left[..480].iter().all(|s| *s == 0.0));
    let energy: f32 = samples.left.iter().map(|s| s * s).sum();
    assert!(energy > 0.0);
    assert_eq!(samples.left[480], -samples.right[480]);
}

#[test]
fn cli_process_simd_matches_scalar() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("dry.wav");
    write_impulse(&input, 2400);

    let scalar = temp.path().join("scalar.wav");
    let vectorized = temp.path().join("vectorized.wav");
    for (path, extra) in [(&scalar, None), (&vectorized, Some("--simd"))] {
        let mut args = vec!["process", path_str(&input), path_str(path), "--tail", "0.1"];
        args.extend(extra);
        assert!(run(&args).status.success());
    }

    let (a, _) = read_wav_stereo(&scalar).unwrap();
    let (b, _) = read_wav_stereo(&vectorized).unwrap();
    assert_eq!(a.len(), b.len());
    for (x, y) in a.left.iter().zip(&b.left) {
        assert!((x - y).abs() < 1e-4);
    }
}

#[test]
fn cli_process_bypass_passes_input_through() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("dry.wav");
    let rendered = temp.path().join("out.wav");
    write_impulse(&input, 100);

    let output = run(&[
        "process",
        path_str(&input),
        path_str(&rendered),
        "--param",
        "bypass=on",
        "--no-tail",
    ]);
    assert!(output.status.success());
    let (samples, _) = read_wav_stereo(&rendered).unwrap();
    assert_eq!(samples.len(), 100);
    assert_eq!(samples.left[0], 1.0);
    // A mono source leaves the second output channel silent under bypass.
    assert!(samples.right.iter().all(|s| *s == 0.0));
}

#[test]
fn cli_process_rejects_bad_arguments() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("dry.wav");
    let rendered = temp.path().join("out.wav");
    write_impulse(&input, 100);

    let output = run(&[
        "process",
        path_str(&input),
        path_str(&rendered),
        "--param",
        "size=3",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("size"));

    let output = run(&[
        "process",
        path_str(&input),
        path_str(&rendered),
        "--bit-depth",
        "12",
    ]);
    assert!(!output.status.success());

    let output = run(&[
        "process",
        path_str(&temp.path().join("missing.wav")),
        path_str(&rendered),
    ]);
    assert!(!output.status.success());
    assert!(!rendered.exists());
}

#[test]
fn cli_process_warns_and_clamps_out_of_range() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("dry.wav");
    let rendered = temp.path().join("out.wav");
    write_impulse(&input, 100);

    let output = run(&[
        "process",
        path_str(&input),
        path_str(&rendered),
        "--param",
        "wet=3",
        "--no-tail",
    ]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("out of range"));
}
