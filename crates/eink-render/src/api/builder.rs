//! PanelRenderer builder -- the primary ergonomic entry point for the crate.
//!
//! [`PanelRenderer`] wraps conditioning, dithering and rotation behind a
//! fluent configuration API.

use std::path::Path;

use image::DynamicImage;

use super::RenderError;
use crate::condition::{self, ConditionOptions, ConditionedImage, ResizeMethod};
use crate::dither::{quantize_with, DitherOptions};
use crate::output::QuantizedImage;
use crate::palette::Palette;

/// High-level renderer producing panel-ready images.
///
/// - Defaults: seven-color palette, `fit`, brightness 1 (no adjustment),
///   raster-order Floyd-Steinberg, 180° rotation on.
/// - Configuration methods consume and return `self`.
/// - [`render()`](Self::render) takes `&self`, so one renderer can be
///   reused across images.
///
/// # Example
///
/// ```
/// use eink_render::{PanelRenderer, ResizeMethod};
/// use image::{DynamicImage, Rgb, RgbImage};
///
/// let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(400, 480, Rgb([0, 0, 255])));
/// let renderer = PanelRenderer::new()
///     .method(ResizeMethod::Pad)
///     .brightness(1.2);
///
/// let frame = renderer.render(&source).unwrap();
/// assert_eq!((frame.width(), frame.height()), (800, 480));
/// ```
#[derive(Debug, Clone)]
pub struct PanelRenderer {
    condition: ConditionOptions,
    dither_opts: DitherOptions,
    rotate: bool,
}

impl Default for PanelRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelRenderer {
    /// Create a renderer with the panel defaults.
    pub fn new() -> Self {
        Self {
            condition: ConditionOptions::new(),
            dither_opts: DitherOptions::new(),
            rotate: true,
        }
    }

    /// Set the resize method.
    #[inline]
    pub fn method(mut self, method: ResizeMethod) -> Self {
        self.condition = self.condition.method(method);
        self
    }

    /// Set the brightness multiplier. Values `<= 1` leave the image untouched.
    #[inline]
    pub fn brightness(mut self, brightness: f32) -> Self {
        self.condition = self.condition.brightness(brightness);
        self
    }

    /// Set serpentine scanning mode.
    #[inline]
    pub fn serpentine(mut self, enabled: bool) -> Self {
        self.dither_opts = self.dither_opts.serpentine(enabled);
        self
    }

    /// Enable or disable the final 180° rotation.
    ///
    /// Only previews should turn this off; the panel expects rotated data.
    #[inline]
    pub fn rotate(mut self, enabled: bool) -> Self {
        self.rotate = enabled;
        self
    }

    /// The conditioning options in effect.
    #[inline]
    pub fn condition_options(&self) -> &ConditionOptions {
        &self.condition
    }

    /// Run only the conditioning stage.
    pub fn condition(&self, image: &DynamicImage) -> Result<ConditionedImage, RenderError> {
        condition::condition(image, &self.condition)
    }

    /// Condition, dither and (unless disabled) rotate a decoded image.
    pub fn render(&self, image: &DynamicImage) -> Result<QuantizedImage, RenderError> {
        let conditioned = self.condition(image)?;
        let quantized = quantize_with(&conditioned, &Palette::SEVEN_COLOR, &self.dither_opts);
        tracing::debug!(
            width = quantized.width(),
            height = quantized.height(),
            rotate = self.rotate,
            "Quantized frame"
        );
        Ok(if self.rotate {
            quantized.rotate_180()
        } else {
            quantized
        })
    }

    /// Decode an image file and render it.
    ///
    /// Decoding failures surface as [`RenderError::ImageDecode`] or
    /// [`RenderError::Io`] before any processing happens.
    pub fn render_path(&self, path: &Path) -> Result<QuantizedImage, RenderError> {
        let image = condition::open(path)?;
        self.render(&image)
    }
}
