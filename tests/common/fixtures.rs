//! Test fixtures and constants.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use base64::Engine;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

/// A solid-color RGB image.
pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(rgb)))
}

/// A smooth color gradient, enough to exercise dithering.
pub fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width) as u8,
            (y * 255 / height) as u8,
            128,
        ])
    }))
}

pub fn png_bytes(image: &DynamicImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// Write `image` as a PNG into `dir` and return its path.
pub fn write_png(dir: &Path, name: &str, image: &DynamicImage) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, png_bytes(image)).unwrap();
    path
}

/// One Call API body with the given current description.
pub fn weather_json(description: &str) -> serde_json::Value {
    serde_json::json!({
        "lat": 40.5972,
        "lon": 22.9503,
        "timezone": "Europe/Athens",
        "current": {
            "dt": 1718971200,
            "temp": 27.4,
            "weather": [
                {"id": 802, "main": "Clouds", "description": description, "icon": "03d"}
            ]
        }
    })
}

/// Images API body carrying `image` as base64 PNG.
pub fn generation_json(image: &DynamicImage) -> serde_json::Value {
    let b64 = base64::engine::general_purpose::STANDARD.encode(png_bytes(image));
    serde_json::json!({
        "created": 1718971200,
        "data": [{"b64_json": b64, "revised_prompt": "a painting"}]
    })
}
