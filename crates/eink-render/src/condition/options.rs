//! Conditioning options and configuration.

use std::fmt;
use std::str::FromStr;

use crate::api::RenderError;

/// How a source image is brought to the panel's aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeMethod {
    /// Scale to cover the panel and crop the overflow, centered.
    #[default]
    Fit,
    /// Scale to fit inside the panel and fill the borders with white.
    Pad,
}

impl ResizeMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            ResizeMethod::Fit => "fit",
            ResizeMethod::Pad => "pad",
        }
    }
}

impl fmt::Display for ResizeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeMethod {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fit" => Ok(ResizeMethod::Fit),
            "pad" => Ok(ResizeMethod::Pad),
            _ => Err(RenderError::UnknownResizeMethod(s.to_string())),
        }
    }
}

/// Configuration for the conditioning stage.
///
/// The target size is not configurable: conditioned images are always
/// [`PANEL_WIDTH`](crate::PANEL_WIDTH) x [`PANEL_HEIGHT`](crate::PANEL_HEIGHT).
///
/// # Example
///
/// ```
/// use eink_render::{ConditionOptions, ResizeMethod};
///
/// let options = ConditionOptions::new()
///     .method(ResizeMethod::Pad)
///     .brightness(1.3);
/// assert_eq!(options.method, ResizeMethod::Pad);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionOptions {
    /// Resize policy.
    pub method: ResizeMethod,

    /// Brightness multiplier.
    ///
    /// - `<= 1.0`: no photometric change at all
    /// - `> 1.0`: contrast scaled by `1 / brightness`, then brightness
    ///   scaled by `brightness`
    pub brightness: f32,
}

impl Default for ConditionOptions {
    fn default() -> Self {
        Self {
            method: ResizeMethod::Fit,
            brightness: 1.0,
        }
    }
}

impl ConditionOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn method(mut self, method: ResizeMethod) -> Self {
        self.method = method;
        self
    }

    #[inline]
    pub fn brightness(mut self, brightness: f32) -> Self {
        self.brightness = brightness;
        self
    }

    /// Reject values the enhancement math cannot handle.
    pub fn validate(&self) -> Result<(), RenderError> {
        if !self.brightness.is_finite() {
            return Err(RenderError::InvalidBrightness(self.brightness));
        }
        Ok(())
    }
}
