//! Stereo wet/dry mixer with the right-channel polarity flip.
//!
//! Both output channels carry the same mono wet signal; the second (and any
//! further) channel receives it inverted, which widens the image without a
//! true stereo reverb:
//!
//! ```text
//! out[0] = dry[0] * (1 - wet_mix) + wet * wet_mix
//! out[1] = dry[1] * (1 - wet_mix) - wet * wet_mix
//! ```

/// Maximum number of dry channels kept for mixing.
pub const DRY_CHANNELS: usize = 2;

/// Holds the dry copy of a block and writes the final mix.
#[derive(Debug, Clone)]
pub struct Mixer {
    dry: [Vec<f32>; DRY_CHANNELS],
    dry_channels: usize,
}

impl Mixer {
    /// Allocates dry storage for blocks of up to `max_block` samples.
    pub fn new(max_block: usize) -> Self {
        let len = max_block.max(1);
        Self {
            dry: [vec![0.0; len], vec![0.0; len]],
            dry_channels: 0,
        }
    }

    /// Largest block the dry storage can hold.
    pub fn max_block(&self) -> usize {
        self.dry[0].len()
    }

    /// Number of channels captured by the last [`capture_dry`](Self::capture_dry).
    pub fn dry_channels(&self) -> usize {
        self.dry_channels
    }

    /// Copies `len` samples from `start` of the first `num_inputs` channels
    /// (at most [`DRY_CHANNELS`]) into dry storage.
    pub fn capture_dry(&mut self, channels: &[&mut [f32]], num_inputs: usize, start: usize, len: usize) {
        self.dry_channels = num_inputs.min(channels.len()).min(DRY_CHANNELS);
        for (dry, channel) in self.dry.iter_mut().zip(channels).take(self.dry_channels) {
            dry[..len].copy_from_slice(&channel[start..start + len]);
        }
    }

    /// Dry samples for output channel `channel`.
    ///
    /// The index is clamped to the last captured channel, so a mono input
    /// feeds both outputs. `None` when nothing was captured.
    pub fn dry(&self, channel: usize, len: usize) -> Option<&[f32]> {
        let last = self.dry_channels.checked_sub(1)?;
        Some(&self.dry[channel.min(last)][..len])
    }

    /// Writes the mix of dry storage and `wet` into every channel of
    /// `outputs`, starting at `start`.
    pub fn mix(&self, wet: &[f32], outputs: &mut [&mut [f32]], start: usize, wet_mix: f32) {
        let len = wet.len();
        let dry_gain = 1.0 - wet_mix;
        for (ch, channel) in outputs.iter_mut().enumerate() {
            let wet_gain = if ch == 0 { wet_mix } else { -wet_mix };
            let out = &mut channel[start..start + len];
            match self.dry(ch, len) {
                Some(dry) => {
                    for ((o, &d), &w) in out.iter_mut().zip(dry).zip(wet) {
                        *o = d * dry_gain + w * wet_gain;
                    }
                }
                None => {
                    for (o, &w) in out.iter_mut().zip(wet) {
                        *o = w * wet_gain;
                    }
                }
            }
        }
    }
}
