//! Dithering options.

/// Configuration options for error diffusion.
///
/// The default is plain raster order, which is what the panel output is
/// tuned against.
///
/// ```
/// use eink_render::DitherOptions;
///
/// let options = DitherOptions::new().serpentine(true);
/// assert!(options.serpentine);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DitherOptions {
    /// Process odd rows right-to-left with a mirrored kernel.
    ///
    /// Default: `false`
    pub serpentine: bool,
}

impl DitherOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set serpentine scanning mode.
    #[inline]
    pub fn serpentine(mut self, enabled: bool) -> Self {
        self.serpentine = enabled;
        self
    }
}
