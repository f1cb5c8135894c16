//! Contrast and brightness enhancement.
//!
//! Both operations interpolate every channel between a flat "degenerate"
//! image and the original: `out = degenerate + factor * (in - degenerate)`.
//! Results are truncated towards zero and clamped to `0..=255`.

use image::RgbImage;

/// Mean luma of an RGB image, rounded to the nearest integer.
///
/// Luma is the ITU-R 601-2 transform in 16-bit fixed point, which is also
/// what grayscale conversion in most imaging tools produces.
pub fn mean_luma(image: &RgbImage) -> u8 {
    let count = image.width() as u64 * image.height() as u64;
    if count == 0 {
        return 0;
    }

    let sum: u64 = image
        .pixels()
        .map(|p| {
            let [r, g, b] = p.0;
            ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u64
        })
        .sum();

    (sum as f64 / count as f64 + 0.5).floor().min(255.0) as u8
}

#[inline]
fn blend(degenerate: f32, value: u8, factor: f32) -> u8 {
    let out = degenerate + factor * (value as f32 - degenerate);
    if out <= 0.0 {
        0
    } else if out >= 255.0 {
        255
    } else {
        out as u8
    }
}

/// Scale contrast around the image's mean luma.
///
/// `factor` 1.0 returns the original, 0.0 a flat grey image.
pub fn contrast(image: &mut RgbImage, factor: f32) {
    let mean = mean_luma(image) as f32;
    for pixel in image.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            *channel = blend(mean, *channel, factor);
        }
    }
}

/// Scale brightness towards (or away from) black.
///
/// `factor` 1.0 returns the original, 0.0 a black image.
pub fn brightness(image: &mut RgbImage, factor: f32) {
    for pixel in image.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            *channel = blend(0.0, *channel, factor);
        }
    }
}

/// Apply the panel's brightness boost.
///
/// Only factors strictly above 1 do anything: contrast is first reduced by
/// `1 / factor` to keep highlights from clipping, then brightness is raised
/// by `factor`. Anything `<= 1` leaves the image untouched.
pub fn adjust_brightness(image: &mut RgbImage, factor: f32) {
    if factor <= 1.0 {
        return;
    }
    contrast(image, 1.0 / factor);
    brightness(image, factor);
}
