//! Unified error type for the eink-render public API.

use thiserror::Error;

/// Everything that can go wrong before a frame reaches the panel.
///
/// All variants are raised before any hardware is touched, so callers can
/// treat them as fatal to the invocation.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The source bytes are not a readable image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The source file could not be read.
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),

    /// Resize method selector was not `fit` or `pad`.
    #[error("unknown resize method '{0}' (expected 'fit' or 'pad')")]
    UnknownResizeMethod(String),

    /// Brightness multiplier was NaN or infinite.
    #[error("brightness must be a finite number, got {0}")]
    InvalidBrightness(f32),

    /// No colors provided in palette.
    #[error("palette cannot be empty")]
    EmptyPalette,

    /// Duplicate color found at the specified index.
    #[error("duplicate color found at index {index}")]
    DuplicateColor { index: usize },
}
