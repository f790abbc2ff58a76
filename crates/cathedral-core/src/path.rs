//! Execution path selection for the filter block loops.

/// Width of the wide-arithmetic groups used by [`ProcessPath::Vectorized`].
pub const SIMD_LANES: usize = 8;

/// Which block implementation a filter runs.
///
/// Both paths compute the same recurrence and produce equivalent output.
/// [`ProcessPath::Scalar`] is the sample-by-sample reference;
/// [`ProcessPath::Vectorized`] processes groups of [`SIMD_LANES`] samples with
/// `wide::f32x8` arithmetic around the sequential delay-line access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProcessPath {
    /// Sample-by-sample reference implementation.
    #[default]
    Scalar,
    /// Grouped implementation using wide arithmetic.
    Vectorized,
}

impl ProcessPath {
    /// Maps a "use vectorized path" switch onto a path.
    #[inline]
    pub fn from_flag(use_simd: bool) -> Self {
        if use_simd { Self::Vectorized } else { Self::Scalar }
    }

    /// Returns `true` for [`ProcessPath::Vectorized`].
    #[inline]
    pub fn is_vectorized(self) -> bool {
        matches!(self, Self::Vectorized)
    }
}
