use thiserror::Error;

use crate::panel::SessionError;
use eink_render::RenderError;

/// Failures of a display invocation that escape the session.
///
/// Render errors happen before the panel is touched. Device faults never
/// show up here; the session contains them.
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Failed to write frame: {0}")]
    Write(#[source] image::ImageError),
}

/// Failures while producing a source image from weather conditions.
///
/// All of these happen before the panel is touched.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Missing API key: environment variable {0} is not set")]
    MissingApiKey(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

impl From<base64::DecodeError> for AcquireError {
    fn from(e: base64::DecodeError) -> Self {
        AcquireError::Decode(e.to_string())
    }
}

impl From<image::ImageError> for AcquireError {
    fn from(e: image::ImageError) -> Self {
        AcquireError::Decode(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}
