//! Fit and pad resizing.
//!
//! Both policies resample with Catmull-Rom (bicubic) and always return
//! exactly the requested size.

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

use super::ResizeMethod;

/// Border color used by [`ResizeMethod::Pad`].
pub const PAD_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

const FILTER: FilterType = FilterType::CatmullRom;

/// Resize an RGB image to exactly `width` x `height` using `method`.
pub fn resize_to(image: &RgbImage, width: u32, height: u32, method: ResizeMethod) -> RgbImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }

    match method {
        ResizeMethod::Fit => fit(image, width, height),
        ResizeMethod::Pad => pad(image, width, height),
    }
}

/// Scale to cover the box, then crop the overflow around the center.
fn fit(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    let (src_w, src_h) = image.dimensions();
    let scale = f64::max(
        width as f64 / src_w as f64,
        height as f64 / src_h as f64,
    );
    let scaled_w = ((src_w as f64 * scale).round() as u32).max(width);
    let scaled_h = ((src_h as f64 * scale).round() as u32).max(height);

    let scaled = imageops::resize(image, scaled_w, scaled_h, FILTER);
    let x = (scaled_w - width) / 2;
    let y = (scaled_h - height) / 2;
    imageops::crop_imm(&scaled, x, y, width, height).to_image()
}

/// Scale to fit inside the box, then center on a white canvas.
fn pad(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    let (src_w, src_h) = image.dimensions();
    let src_ratio = src_w as f64 / src_h as f64;
    let dst_ratio = width as f64 / height as f64;

    let (inner_w, inner_h) = if src_ratio > dst_ratio {
        let h = (width as f64 / src_ratio).round() as u32;
        (width, h.clamp(1, height))
    } else if src_ratio < dst_ratio {
        let w = (height as f64 * src_ratio).round() as u32;
        (w.clamp(1, width), height)
    } else {
        (width, height)
    };

    let inner = if (inner_w, inner_h) == (src_w, src_h) {
        image.clone()
    } else {
        imageops::resize(image, inner_w, inner_h, FILTER)
    };

    let mut canvas = RgbImage::from_pixel(width, height, PAD_COLOR);
    let x = ((width - inner_w) as f64 * 0.5).round_ties_even() as i64;
    let y = ((height - inner_h) as f64 * 0.5).round_ties_even() as i64;
    imageops::replace(&mut canvas, &inner, x, y);
    canvas
}
