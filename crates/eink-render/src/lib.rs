//! eink-render: image conditioning and seven-color dithering for e-paper panels
//!
//! This library turns an arbitrary source image into pixel data that a
//! 7-color 800x480 e-paper panel can show without any further color
//! processing. It stops at the palette-indexed image; packing that image
//! into a device framebuffer is the panel driver's job.
//!
//! # Quick Start
//!
//! The [`PanelRenderer`] builder is the primary entry point:
//!
//! ```
//! use eink_render::{PanelRenderer, ResizeMethod, PANEL_HEIGHT, PANEL_WIDTH};
//! use image::{DynamicImage, RgbImage, Rgb};
//!
//! let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(1920, 1080, Rgb([255, 0, 0])));
//!
//! let renderer = PanelRenderer::new().method(ResizeMethod::Fit);
//! let frame = renderer.render(&source).unwrap();
//!
//! assert_eq!(frame.width(), PANEL_WIDTH);
//! assert_eq!(frame.height(), PANEL_HEIGHT);
//! ```
//!
//! # Pipeline Overview
//!
//! ```text
//! SourceImage             (any size, any color type)
//!     |
//!     v
//! [Resize]                fit: cover + center crop / pad: contain on white
//!     |
//!     v
//! [RGB8]                  alpha and palette modes dropped
//!     |
//!     v
//! [Enhance]               only when brightness > 1:
//!     |                     contrast(1 / brightness), then brightness(brightness)
//!     v
//! ConditionedImage        exactly 800x480 RGB
//!     |
//!     v
//! [Floyd-Steinberg]       error diffusion against the fixed palette
//!     |
//!     v
//! [Rotate 180]            panel is mounted upside down
//!     |
//!     v
//! QuantizedImage          every pixel is a PanelColor
//! ```
//!
//! # Palette
//!
//! [`Palette::SEVEN_COLOR`] is a constant. Quantized pixels are stored as
//! [`PanelColor`] values rather than RGB triples, so an off-palette color
//! cannot be represented in a [`QuantizedImage`] at all.
//!
//! # Ordering
//!
//! Rotation happens after quantization. Dithering a rotated RGB image would
//! diffuse error in the opposite scan direction and give a different (not
//! merely rotated) result, which is not what the panel was tuned against.

pub mod api;
pub mod condition;
pub mod dither;
pub mod output;
pub mod palette;

#[cfg(test)]
mod domain_tests;

pub use api::{PanelRenderer, RenderError};
pub use condition::{
    condition, decode, open, ConditionOptions, ConditionedImage, ResizeMethod,
};
pub use dither::{quantize, quantize_with, Dither, DitherOptions, FloydSteinberg};
pub use output::QuantizedImage;
pub use palette::{PanelColor, Palette};

/// Native panel width in pixels.
pub const PANEL_WIDTH: u32 = 800;

/// Native panel height in pixels.
pub const PANEL_HEIGHT: u32 = 480;
