//! The reverb engine.
//!
//! Per block:
//!
//! ```text
//! input ─┬─> downmix ─> hi-cut ─> pre-delay ─> 4 combs (parallel, ×¼) ─> 8 allpasses (series) ─┐
//!        │                                                                                       │ wet
//!        └─> dry copy ─────────────────────────────────────────────────────────────> mixer <───┘
//!                                                                                     │
//!                                                                   L = dry·(1-w) + wet·w
//!                                                                   R = dry·(1-w) - wet·w
//! ```
//!
//! Parameters are read once per block. Coefficients are recomputed from them
//! before any sample is processed. The engine never allocates after
//! [`ReverbEngine::prepare`]; blocks longer than the prepared size are run in
//! prepared-size chunks.

use crate::allpass_chain::AllpassChain;
use crate::comb_bank::CombBank;
use crate::cpu::CpuMeter;
use crate::mixer::Mixer;
use crate::params::ReverbParams;
use crate::predelay::PreDelay;
use crate::tone::ToneShaper;
use crate::topology::TAIL_SECONDS;
use cathedral_core::ProcessPath;

/// Schroeder cathedral reverb: mono or stereo in, stereo out.
///
/// # Example
///
/// ```rust
/// use cathedral_reverb::{ReverbEngine, ReverbParams};
///
/// let mut engine = ReverbEngine::new(48000.0, 256);
/// let params = ReverbParams { wet_mix: 1.0, ..ReverbParams::default() };
///
/// let left = vec![0.0f32; 256];
/// let right = vec![0.0f32; 256];
/// let mut out_l = vec![0.0f32; 256];
/// let mut out_r = vec![0.0f32; 256];
///
/// engine.process(&params, &[&left, &right], &mut [&mut out_l, &mut out_r]);
/// assert!(out_l.iter().all(|s| *s == 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct ReverbEngine {
    sample_rate: f32,
    max_block: usize,
    tone: ToneShaper,
    predelay: PreDelay,
    combs: CombBank,
    allpasses: AllpassChain,
    mixer: Mixer,
    mono: Vec<f32>,
    wet: Vec<f32>,
    cpu: CpuMeter,
}

impl ReverbEngine {
    /// Creates an engine prepared for `sample_rate` and blocks of up to
    /// `max_block` samples.
    pub fn new(sample_rate: f32, max_block: usize) -> Self {
        let max_block = max_block.max(1);
        let engine = Self {
            sample_rate,
            max_block,
            tone: ToneShaper::new(),
            predelay: PreDelay::new(sample_rate),
            combs: CombBank::new(sample_rate, max_block),
            allpasses: AllpassChain::new(sample_rate),
            mixer: Mixer::new(max_block),
            mono: vec![0.0; max_block],
            wet: vec![0.0; max_block],
            cpu: CpuMeter::new(sample_rate),
        };
        tracing::debug!(
            sample_rate,
            max_block,
            comb_delays = ?engine.combs.delay_samples(),
            allpass_delays = ?engine.allpasses.delay_samples(),
            predelay_capacity = engine.predelay.capacity(),
            "reverb prepared"
        );
        engine
    }

    /// Reallocates every buffer for a new sample rate or block size.
    ///
    /// All delay contents, filter memories and the CPU reading return to zero.
    /// Must not run concurrently with [`process`](Self::process).
    pub fn prepare(&mut self, sample_rate: f32, max_block: usize) {
        *self = Self::new(sample_rate, max_block);
    }

    /// Clears all signal state without reallocating.
    pub fn reset(&mut self) {
        self.tone.reset();
        self.predelay.reset();
        self.combs.reset();
        self.allpasses.reset();
    }

    /// Returns `true` when no stage holds any energy.
    pub fn is_silent(&self) -> bool {
        self.tone.is_silent()
            && self.predelay.is_silent()
            && self.combs.is_silent()
            && self.allpasses.is_silent()
    }

    /// Sample rate the engine is prepared for.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Largest block processed in one pass.
    pub fn max_block_size(&self) -> usize {
        self.max_block
    }

    /// Length of the reverb tail after the input stops, in seconds.
    pub fn tail_length_seconds(&self) -> f32 {
        TAIL_SECONDS
    }

    /// Whether a bus layout is supported: mono or stereo in, stereo out.
    pub fn supports_layout(input_channels: usize, output_channels: usize) -> bool {
        matches!(input_channels, 1 | 2) && output_channels == 2
    }

    /// Processing time of the last non-bypassed block relative to its
    /// real-time duration.
    pub fn cpu_usage(&self) -> f32 {
        self.cpu.usage()
    }

    /// The parallel comb section.
    pub fn comb_bank(&self) -> &CombBank {
        &self.combs
    }

    /// The series allpass section.
    pub fn allpass_chain(&self) -> &AllpassChain {
        &self.allpasses
    }

    /// The pre-delay stage.
    pub fn pre_delay(&self) -> &PreDelay {
        &self.predelay
    }

    /// Processes `input` into `output`.
    ///
    /// Output channels beyond the input count receive no dry signal of their
    /// own; the mixer feeds them the last input channel. The block length is
    /// the shortest channel.
    pub fn process(&mut self, params: &ReverbParams, input: &[&[f32]], output: &mut [&mut [f32]]) {
        let num_inputs = input.len().min(output.len());
        let len = input[..num_inputs]
            .iter()
            .map(|ch| ch.len())
            .chain(output.iter().map(|ch| ch.len()))
            .min()
            .unwrap_or(0);

        for (out, inp) in output.iter_mut().zip(input) {
            out[..len].copy_from_slice(&inp[..len]);
        }
        self.process_inplace(params, &mut output[..], num_inputs, len);
    }

    /// Processes a buffer in place, where the first `num_inputs` channels
    /// hold the input.
    ///
    /// Channels at or beyond `num_inputs` are cleared first. With bypass on,
    /// input channels are left untouched and no internal state advances.
    pub fn process_buffer(&mut self, params: &ReverbParams, channels: &mut [&mut [f32]], num_inputs: usize) {
        let len = channels.iter().map(|ch| ch.len()).min().unwrap_or(0);
        self.process_inplace(params, channels, num_inputs, len);
    }

    fn process_inplace(
        &mut self,
        params: &ReverbParams,
        channels: &mut [&mut [f32]],
        num_inputs: usize,
        len: usize,
    ) {
        let num_inputs = num_inputs.min(channels.len());
        for channel in channels.iter_mut().skip(num_inputs) {
            channel[..len].fill(0.0);
        }

        let params = params.clamped();
        if params.bypass || len == 0 {
            return;
        }

        let started = self.cpu.start();
        let path = params.process_path();

        self.predelay.set_delay_ms(params.pre_delay_ms);
        self.combs
            .update(params.decay_time, params.damping_pct, params.bass_mult);
        self.allpasses.set_diffusion(params.diffusion);

        let mut start = 0;
        while start < len {
            let chunk = (len - start).min(self.max_block);
            self.process_chunk(&params, channels, num_inputs, start, chunk, path);
            start += chunk;
        }

        self.cpu.finish(started, len);
    }

    fn process_chunk(
        &mut self,
        params: &ReverbParams,
        channels: &mut [&mut [f32]],
        num_inputs: usize,
        start: usize,
        len: usize,
        path: ProcessPath,
    ) {
        self.mixer.capture_dry(channels, num_inputs, start, len);

        let mono = &mut self.mono[..len];
        downmix(channels, num_inputs, start, mono);
        self.tone.process_block(mono, params.hi_cut_db);
        self.predelay.process_block(mono);

        let wet = &mut self.wet[..len];
        self.combs.process(mono, wet, path);
        self.allpasses.process(wet, path);

        self.mixer.mix(wet, channels, start, params.wet_mix);
    }
}

/// Averages the first two input channels, or copies a single one.
fn downmix(channels: &[&mut [f32]], num_inputs: usize, start: usize, mono: &mut [f32]) {
    let end = start + mono.len();
    match num_inputs {
        0 => mono.fill(0.0),
        1 => mono.copy_from_slice(&channels[0][start..end]),
        _ => {
            let left = &channels[0][start..end];
            let right = &channels[1][start..end];
            for ((m, &l), &r) in mono.iter_mut().zip(left).zip(right) {
                *m = (l + r) * 0.5;
            }
        }
    }
}
