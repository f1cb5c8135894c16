//! QuantizedImage: a grid of panel colors.

use image::{Rgb, RgbImage};

use crate::palette::PanelColor;

/// An image whose every pixel is one of the panel inks.
///
/// Pixels are stored row-major as [`PanelColor`] values, so nothing
/// outside the palette can be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedImage {
    width: u32,
    height: u32,
    pixels: Vec<PanelColor>,
}

impl QuantizedImage {
    pub(crate) fn new(width: u32, height: u32, pixels: Vec<PanelColor>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Build from raw parts, for callers that already hold panel colors.
    ///
    /// Returns `None` if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<PanelColor>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize)
            .then(|| Self::new(width, height, pixels))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixel colors.
    #[inline]
    pub fn pixels(&self) -> &[PanelColor] {
        &self.pixels
    }

    /// Color at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> PanelColor {
        assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Rotate by 180 degrees.
    ///
    /// Pixel `(x, y)` moves to `(w-1-x, h-1-y)`, which for row-major
    /// storage is a plain reversal.
    pub fn rotate_180(mut self) -> Self {
        self.pixels.reverse();
        self
    }

    /// Expand back to RGB using each ink's nominal value.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| Rgb(self.get(x, y).rgb()))
    }
}
