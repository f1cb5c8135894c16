//! Floyd-Steinberg error diffusion dithering algorithm.

use image::RgbImage;

use crate::palette::{PanelColor, Palette};

use super::{dither_with_kernel, Dither, DitherOptions, FLOYD_STEINBERG};

/// Floyd-Steinberg error diffusion dithering.
///
/// Distributes 100% of the quantization error to four neighbors:
/// 7/16 right, 3/16 bottom-left, 5/16 bottom, 1/16 bottom-right.
pub struct FloydSteinberg;

impl Dither for FloydSteinberg {
    fn dither(
        &self,
        image: &RgbImage,
        palette: &Palette,
        options: &DitherOptions,
    ) -> Vec<PanelColor> {
        dither_with_kernel(image, palette, &FLOYD_STEINBERG, options)
    }
}
