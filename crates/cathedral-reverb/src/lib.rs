//! Cathedral Reverb - Schroeder reverberation engine
//!
//! A fixed-topology reverb built from the primitives in `cathedral-core`:
//!
//! | Stage | Type | Role |
//! |-------|------|------|
//! | Downmix | [`ReverbEngine`] | Stereo input averaged to mono |
//! | Hi-cut | [`ToneShaper`] | One-pole lowpass on the reverb feed |
//! | Pre-delay | [`PreDelay`] | Up to 500 ms of initial silence |
//! | Combs | [`CombBank`] | 4 damped feedback combs in parallel |
//! | Diffusion | [`AllpassChain`] | 8 allpass stages in series |
//! | Mix | [`Mixer`] | Wet/dry blend, right channel polarity-flipped |
//!
//! Parameters are plain data ([`ReverbParams`]) read once per block. For use
//! across threads, [`SharedParams`] stores them in atomics and
//! [`ReverbProcessor`] snapshots them at the start of every block.
//!
//! # Example
//!
//! ```rust
//! use cathedral_reverb::{ReverbEngine, ReverbParams};
//!
//! let mut engine = ReverbEngine::new(48000.0, 512);
//! let params = ReverbParams {
//!     decay_time: 8.0,
//!     pre_delay_ms: 30.0,
//!     ..ReverbParams::default()
//! };
//!
//! let mut input = vec![0.0f32; 512];
//! input[0] = 1.0;
//! let mut left = vec![0.0f32; 512];
//! let mut right = vec![0.0f32; 512];
//! engine.process(&params, &[&input], &mut [&mut left, &mut right]);
//! ```
//!
//! # Real-time Safety
//!
//! All buffers are sized in [`ReverbEngine::new`] / [`ReverbEngine::prepare`].
//! Processing never allocates, locks or logs.

pub mod allpass_chain;
pub mod comb_bank;
pub mod cpu;
pub mod engine;
pub mod mixer;
pub mod params;
pub mod predelay;
pub mod processor;
pub mod shared;
pub mod tone;
pub mod topology;

pub use allpass_chain::{AllpassChain, diffusion_gain};
pub use comb_bank::{CombBank, comb_gain, damping_frequency};
pub use cpu::CpuMeter;
pub use engine::ReverbEngine;
pub use mixer::Mixer;
pub use params::{PARAM_COUNT, ReverbParam, ReverbParams, descriptors};
pub use predelay::PreDelay;
pub use processor::ReverbProcessor;
pub use shared::SharedParams;
pub use tone::ToneShaper;

// Re-export so downstream crates need only this one for the engine surface
pub use cathedral_core::{ParamDescriptor, ParamId, ParamUnit, ParameterInfo, ProcessPath};
