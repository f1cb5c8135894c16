//! On-disk cache of generated images, keyed by condition slug.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use image::ImageFormat;
use regex::Regex;

use crate::error::AcquireError;
use crate::models::Conditions;

fn separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ :\d%/\-]+").expect("slug pattern is valid"))
}

/// Lowercase `s` and collapse runs of spaces, colons, digits, `%`, `/` and
/// `-` into a single `-`, trimmed at both ends.
pub fn slugify(s: &str) -> String {
    separators()
        .replace_all(s, "-")
        .to_lowercase()
        .trim_matches('-')
        .to_string()
}

/// Cache file name for a set of conditions.
///
/// The moon phase is not part of the key.
pub fn file_name(conditions: &Conditions) -> String {
    let weather = conditions.weather.replace([' ', '/'], "-");
    format!(
        "{}-{}-{}-{}.jpg",
        conditions.setting,
        conditions.season,
        slugify(conditions.time_of_day.as_str()),
        weather
    )
}

pub struct ImageCache {
    dir: PathBuf,
}

impl ImageCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, conditions: &Conditions) -> PathBuf {
        self.dir.join(file_name(conditions))
    }

    /// Path of the cached image, if there is one.
    pub fn lookup(&self, conditions: &Conditions) -> Option<PathBuf> {
        let path = self.path_for(conditions);
        path.is_file().then_some(path)
    }

    /// Decode `bytes`, re-encode as JPEG and store under the condition slug.
    pub fn store(&self, conditions: &Conditions, bytes: &[u8]) -> Result<PathBuf, AcquireError> {
        std::fs::create_dir_all(&self.dir)?;

        let decoded = image::load_from_memory(bytes)?;
        let mut encoded = Cursor::new(Vec::new());
        decoded
            .to_rgb8()
            .write_to(&mut encoded, ImageFormat::Jpeg)?;

        let path = self.path_for(conditions);
        std::fs::write(&path, encoded.into_inner())?;
        tracing::info!(path = %path.display(), "Cached generated image");
        Ok(path)
    }
}
