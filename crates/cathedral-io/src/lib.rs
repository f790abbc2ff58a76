//! File I/O for the cathedral reverb.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav_stereo`], [`write_wav_stereo`], [`write_wav`]
//!   and [`read_wav_info`]
//! - **Offline rendering**: [`OfflineRenderer`] runs a whole file through the
//!   engine and appends the reverb tail
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cathedral_io::{OfflineRenderer, read_wav_stereo, write_wav_stereo};
//! use cathedral_reverb::ReverbParams;
//!
//! let (input, spec) = read_wav_stereo("dry.wav")?;
//! let mut renderer = OfflineRenderer::new(spec.sample_rate as f32, ReverbParams::default());
//! let wet = renderer.render(&input, spec.channels as usize, |_, _| {});
//! write_wav_stereo("wet.wav", &wet, spec)?;
//! # Ok::<(), cathedral_io::Error>(())
//! ```

mod render;
mod wav;

pub use render::{DEFAULT_BLOCK_SIZE, OfflineRenderer};
pub use wav::{
    StereoSamples, WavFormat, WavInfo, WavSpec, read_wav_info, read_wav_stereo, write_wav,
    write_wav_stereo,
};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The file's channel layout is not mono or stereo.
    #[error("Unsupported channel count: {0} (expected 1 or 2)")]
    UnsupportedChannels(u16),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
