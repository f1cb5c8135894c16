//! Error diffusion dithering.
//!
//! Every algorithm implements [`Dither`] on top of one diffusion loop
//! driven by a [`Kernel`]. Error is accumulated in 8-bit sRGB units
//! and every pixel plus its carried error is clamped to `0..=255` before
//! the nearest palette entry is chosen.

mod floyd_steinberg;
mod kernel;
mod options;

pub use floyd_steinberg::FloydSteinberg;
pub use kernel::{Kernel, FLOYD_STEINBERG};
pub use options::DitherOptions;

use std::collections::VecDeque;

use image::RgbImage;

use crate::condition::ConditionedImage;
use crate::output::QuantizedImage;
use crate::palette::{PanelColor, Palette};

/// An error diffusion algorithm.
pub trait Dither {
    /// Dither an image to panel colors.
    ///
    /// Returns one [`PanelColor`] per pixel in row-major order, each of
    /// them an entry of `palette`.
    fn dither(
        &self,
        image: &RgbImage,
        palette: &Palette,
        options: &DitherOptions,
    ) -> Vec<PanelColor>;
}

/// Error carried forward to rows not yet visited.
///
/// Front row is the one being scanned; it is recycled as the back row
/// once the scan moves down.
#[derive(Debug)]
pub struct ErrorRows {
    rows: VecDeque<Vec<[f32; 3]>>,
}

impl ErrorRows {
    /// Keep `depth` rows of `width` pixels each.
    pub fn new(width: usize, depth: usize) -> Self {
        Self {
            rows: (0..depth.max(1)).map(|_| vec![[0.0; 3]; width]).collect(),
        }
    }

    /// Error carried into pixel `x` of the current row.
    #[inline]
    pub fn carried(&self, x: usize) -> [f32; 3] {
        self.rows.front().map_or([0.0; 3], |row| row[x])
    }

    /// Push `error` onto pixel `x`, `dy` rows below the current one.
    /// Targets outside the window are dropped.
    #[inline]
    pub fn spread(&mut self, x: usize, dy: usize, error: [f32; 3]) {
        if let Some(cell) = self.rows.get_mut(dy).and_then(|row| row.get_mut(x)) {
            for (acc, e) in cell.iter_mut().zip(error) {
                *acc += e;
            }
        }
    }

    /// Move down one row.
    pub fn next_row(&mut self) {
        if let Some(mut done) = self.rows.pop_front() {
            done.fill([0.0; 3]);
            self.rows.push_back(done);
        }
    }
}

/// Column visiting order for one row.
fn scan_order(width: usize, reverse: bool) -> impl Iterator<Item = usize> {
    (0..width).map(move |i| if reverse { width - 1 - i } else { i })
}

/// Diffuse quantization error through `kernel`, one row at a time.
pub(crate) fn dither_with_kernel(
    image: &RgbImage,
    palette: &Palette,
    kernel: &Kernel,
    options: &DitherOptions,
) -> Vec<PanelColor> {
    let (width, height) = (image.width() as usize, image.height() as usize);
    let mut inks = Vec::with_capacity(width * height);
    let mut row_inks = vec![PanelColor::White; width];
    let mut carry = ErrorRows::new(width, kernel.max_dy + 1);
    let divisor = f32::from(kernel.divisor);

    for (y, row) in image.rows().enumerate() {
        let row: Vec<[u8; 3]> = row.map(|p| p.0).collect();
        let reverse = options.serpentine && y % 2 == 1;

        for x in scan_order(width, reverse) {
            let carried = carry.carried(x);
            let mut pixel = [0.0f32; 3];
            for c in 0..3 {
                pixel[c] = (f32::from(row[x][c]) + carried[c]).clamp(0.0, 255.0);
            }

            let ink = palette.find_nearest(pixel);
            row_inks[x] = ink;

            let target = ink.rgb();
            let residual = [
                pixel[0] - f32::from(target[0]),
                pixel[1] - f32::from(target[1]),
                pixel[2] - f32::from(target[2]),
            ];

            for &(dx, dy, weight) in kernel.entries {
                let dx = if reverse { -dx } else { dx };
                let Some(nx) = x.checked_add_signed(dx as isize) else {
                    continue;
                };
                if nx >= width || y + dy as usize >= height {
                    continue;
                }
                let share = f32::from(weight) / divisor;
                carry.spread(nx, dy as usize, residual.map(|e| e * share));
            }
        }

        inks.extend_from_slice(&row_inks);
        carry.next_row();
    }

    inks
}

/// Dither a conditioned image with Floyd-Steinberg in raster order.
///
/// The result is upright; the panel rotation is a separate step
/// ([`QuantizedImage::rotate_180`]).
pub fn quantize(image: &ConditionedImage, palette: &Palette) -> QuantizedImage {
    quantize_with(image, palette, &DitherOptions::new())
}

/// Like [`quantize`], with explicit dithering options.
pub fn quantize_with(
    image: &ConditionedImage,
    palette: &Palette,
    options: &DitherOptions,
) -> QuantizedImage {
    let rgb = image.as_rgb();
    let pixels = FloydSteinberg.dither(rgb, palette, options);
    QuantizedImage::new(rgb.width(), rgb.height(), pixels)
}
