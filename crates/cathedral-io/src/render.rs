//! Offline rendering of whole files through the reverb.

use crate::StereoSamples;
use cathedral_reverb::{ReverbEngine, ReverbParams};
use std::borrow::Cow;

/// Default block size for offline rendering.
pub const DEFAULT_BLOCK_SIZE: usize = 512;

/// Runs a complete signal through a [`ReverbEngine`] block by block.
///
/// After the input ends the renderer keeps feeding silence for the tail
/// length, so the decay is not cut off.
///
/// ```rust
/// use cathedral_io::{OfflineRenderer, StereoSamples};
/// use cathedral_reverb::ReverbParams;
///
/// let mut renderer = OfflineRenderer::new(48000.0, ReverbParams::default())
///     .with_tail_seconds(0.5);
/// let input = StereoSamples::from_mono(vec![0.0; 1000]);
/// let output = renderer.render(&input, 1, |_, _| {});
/// assert_eq!(output.len(), 1000 + 24000);
/// ```
#[derive(Debug)]
pub struct OfflineRenderer {
    engine: ReverbEngine,
    params: ReverbParams,
    block_size: usize,
    tail_seconds: f32,
}

impl OfflineRenderer {
    /// Creates a renderer with the engine's full tail length.
    pub fn new(sample_rate: f32, params: ReverbParams) -> Self {
        let engine = ReverbEngine::new(sample_rate, DEFAULT_BLOCK_SIZE);
        let tail_seconds = engine.tail_length_seconds();
        Self {
            engine,
            params: params.clamped(),
            block_size: DEFAULT_BLOCK_SIZE,
            tail_seconds,
        }
    }

    /// Sets the processing block size (at least 1).
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self.engine.prepare(self.engine.sample_rate(), self.block_size);
        self
    }

    /// Overrides the tail length. Zero renders exactly the input length.
    pub fn with_tail_seconds(mut self, seconds: f32) -> Self {
        self.tail_seconds = seconds.max(0.0);
        self
    }

    /// Parameters used for every block.
    pub fn params(&self) -> &ReverbParams {
        &self.params
    }

    /// Number of tail frames appended after the input.
    pub fn tail_frames(&self) -> usize {
        (f64::from(self.tail_seconds) * f64::from(self.engine.sample_rate())).round() as usize
    }

    /// The underlying engine.
    pub fn engine(&self) -> &ReverbEngine {
        &self.engine
    }

    /// Renders `input` plus the tail.
    ///
    /// `input_channels` is 1 for a mono source (only `input.left` is fed to
    /// the engine) or 2 for stereo. `progress` receives `(frames_done,
    /// frames_total)` after each block.
    pub fn render(
        &mut self,
        input: &StereoSamples,
        input_channels: usize,
        mut progress: impl FnMut(usize, usize),
    ) -> StereoSamples {
        let input_channels = input_channels.clamp(1, 2);
        let total = input.len() + self.tail_frames();
        let mut output = StereoSamples::new(vec![0.0; total], vec![0.0; total]);

        tracing::info!(
            frames = input.len(),
            tail_frames = total - input.len(),
            block_size = self.block_size,
            vectorized = self.params.use_simd,
            "rendering"
        );

        let silence = vec![0.0f32; self.block_size];
        let mut start = 0;
        while start < total {
            let end = (start + self.block_size).min(total);
            let len = end - start;

            let left_in = input_block(&input.left, start, end, &silence);
            let right_in = input_block(&input.right, start, end, &silence);
            let out_l = &mut output.left[start..end];
            let out_r = &mut output.right[start..end];

            if input_channels == 1 {
                self.engine.process(&self.params, &[&left_in[..len]], &mut [out_l, out_r]);
            } else {
                self.engine.process(
                    &self.params,
                    &[&left_in[..len], &right_in[..len]],
                    &mut [out_l, out_r],
                );
            }

            start = end;
            progress(start, total);
        }

        tracing::info!(peak = output.peak(), "render finished");
        output
    }
}

/// Input samples for `[start, end)`, padded with silence past the input's end.
fn input_block<'a>(
    channel: &'a [f32],
    start: usize,
    end: usize,
    silence: &'a [f32],
) -> Cow<'a, [f32]> {
    if end <= channel.len() {
        Cow::Borrowed(&channel[start..end])
    } else if start >= channel.len() {
        Cow::Borrowed(&silence[..end - start])
    } else {
        let mut block = channel[start..].to_vec();
        block.resize(end - start, 0.0);
        Cow::Owned(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_block_pads_with_silence() {
        let channel = [1.0, 2.0, 3.0];
        let silence = [0.0; 4];
        assert_eq!(&*input_block(&channel, 0, 2, &silence), &[1.0, 2.0]);
        assert_eq!(&*input_block(&channel, 2, 5, &silence), &[3.0, 0.0, 0.0]);
        assert_eq!(&*input_block(&channel, 3, 7, &silence), &[0.0; 4]);
    }

    #[test]
    fn tail_frames_follow_sample_rate() {
        let renderer = OfflineRenderer::new(44100.0, ReverbParams::default());
        assert_eq!(renderer.tail_frames(), 20 * 44100);
        let renderer = renderer.with_tail_seconds(1.5);
        assert_eq!(renderer.tail_frames(), 66150);
        assert_eq!(renderer.with_tail_seconds(-3.0).tail_frames(), 0);
    }

    #[test]
    fn progress_reaches_total() {
        let mut renderer = OfflineRenderer::new(48000.0, ReverbParams::default())
            .with_block_size(100)
            .with_tail_seconds(0.01);
        let input = StereoSamples::from_mono(vec![0.1; 250]);
        let mut calls = Vec::new();
        let output = renderer.render(&input, 2, |done, total| calls.push((done, total)));
        assert_eq!(output.len(), 250 + 480);
        assert_eq!(calls.last(), Some(&(730, 730)));
        assert_eq!(calls.len(), 8);
    }

    #[test]
    fn block_size_does_not_change_output() {
        let params = ReverbParams {
            pre_delay_ms: 2.0,
            ..ReverbParams::default()
        };
        let input = StereoSamples::new(
            (0..900).map(|i| ((i * 13) % 29) as f32 / 29.0 - 0.5).collect(),
            (0..900).map(|i| ((i * 7) % 31) as f32 / 31.0 - 0.5).collect(),
        );
        let a = OfflineRenderer::new(48000.0, params)
            .with_block_size(64)
            .with_tail_seconds(0.02)
            .render(&input, 2, |_, _| {});
        let b = OfflineRenderer::new(48000.0, params)
            .with_block_size(1000)
            .with_tail_seconds(0.02)
            .render(&input, 2, |_, _| {});
        for (x, y) in a.left.iter().zip(&b.left).chain(a.right.iter().zip(&b.right)) {
            assert!((x - y).abs() < 1e-6);
        }
    }
}
