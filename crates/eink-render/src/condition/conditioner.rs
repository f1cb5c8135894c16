//! Decode, resize and enhance a source image for the panel.

use std::path::Path;

use image::{DynamicImage, RgbImage};

use super::{adjust_brightness, resize_to, ConditionOptions};
use crate::api::RenderError;
use crate::{PANEL_HEIGHT, PANEL_WIDTH};

/// An RGB image at exactly the panel's native resolution.
///
/// Only [`condition`] creates these, so holding one means resizing and
/// enhancement have already happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionedImage(RgbImage);

impl ConditionedImage {
    pub(crate) fn new(image: RgbImage) -> Self {
        debug_assert_eq!(image.dimensions(), (PANEL_WIDTH, PANEL_HEIGHT));
        Self(image)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.0.height()
    }

    #[inline]
    pub fn as_rgb(&self) -> &RgbImage {
        &self.0
    }

    pub fn into_inner(self) -> RgbImage {
        self.0
    }
}

/// Decode an in-memory encoded image (PNG, JPEG, ...).
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, RenderError> {
    Ok(image::load_from_memory(bytes)?)
}

/// Read and decode an image file.
pub fn open(path: &Path) -> Result<DynamicImage, RenderError> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}

/// Resize to the panel resolution, then apply the brightness boost.
///
/// # Errors
///
/// [`RenderError::InvalidBrightness`] if the brightness is not finite.
pub fn condition(
    image: &DynamicImage,
    options: &ConditionOptions,
) -> Result<ConditionedImage, RenderError> {
    options.validate()?;

    let rgb = image.to_rgb8();
    let mut resized = resize_to(&rgb, PANEL_WIDTH, PANEL_HEIGHT, options.method);
    adjust_brightness(&mut resized, options.brightness);

    tracing::debug!(
        source_width = image.width(),
        source_height = image.height(),
        method = %options.method,
        brightness = options.brightness,
        "Conditioned image"
    );

    Ok(ConditionedImage::new(resized))
}
