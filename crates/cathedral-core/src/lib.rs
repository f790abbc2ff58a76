//! Cathedral Core - DSP primitives for Schroeder-style reverberation
//!
//! This crate provides the building blocks the cathedral reverb engine is made
//! of, designed for real-time audio processing with zero allocation in the
//! audio path.
//!
//! # Core Abstractions
//!
//! ## Delay Lines
//!
//! - [`DelayLine`] - Fixed-capacity circular buffer with read-before-write stepping
//!   and a runtime-adjustable active length
//!
//! ## Filters
//!
//! - [`CombFilter`] - Feedback comb with a one-pole damping filter in the feedback path
//! - [`AllpassFilter`] - Schroeder allpass for diffusion
//! - [`OnePole`] - 6 dB/oct lowpass used for damping and tone shaping
//!
//! ## Execution Paths
//!
//! Comb and allpass filters expose two block implementations selected by
//! [`ProcessPath`]: a scalar sample-by-sample reference and a vectorized path
//! built on `wide::f32x8`. Both produce equivalent output.
//!
//! ## Parameters
//!
//! - [`ParameterInfo`] - Index-based parameter introspection
//! - [`ParamDescriptor`] - Parameter metadata (range, default, unit, stable ID)
//!
//! ## Utilities
//!
//! - Math functions: [`db_to_linear`], [`linear_to_db`], [`flush_denormal`], etc.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded audio applications.
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! cathedral-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use cathedral_core::{AllpassFilter, CombFilter, ProcessPath};
//!
//! let mut comb = CombFilter::new(4800, 48000.0);
//! comb.set_delay_samples(1116);
//! comb.set_feedback(0.8);
//! comb.set_damping_hz(6000.0);
//!
//! let mut allpass = AllpassFilter::new(2400);
//! allpass.set_delay_samples(556);
//! allpass.set_gain(0.5);
//!
//! let input = [1.0, 0.0, 0.0, 0.0];
//! let mut wet = [0.0; 4];
//! comb.process_block(&input, &mut wet, ProcessPath::Scalar);
//! allpass.process_block_inplace(&mut wet, ProcessPath::Vectorized);
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations in audio processing paths
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Clamp, don't fail**: Out-of-range gains and lengths are clamped at the point of use

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod allpass;
pub mod comb;
pub mod delay;
pub mod math;
pub mod one_pole;
pub mod param_info;
pub mod path;

// Re-export main types at crate root
pub use allpass::AllpassFilter;
pub use comb::CombFilter;
pub use delay::DelayLine;
pub use math::{db_to_linear, flush_denormal, lerp, linear_to_db, map_range, ms_to_samples};
pub use one_pole::OnePole;
pub use param_info::{ParamDescriptor, ParamId, ParamUnit, ParameterInfo};
pub use path::{ProcessPath, SIMD_LANES};
