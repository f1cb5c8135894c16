use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "inkframe.yaml";

/// Application configuration loaded from inkframe.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub location: LocationConfig,
    pub weather: WeatherConfig,
    pub generator: GeneratorConfig,
    pub prompt: PromptConfig,

    /// Directory holding generated images, keyed by condition slug
    pub cache_dir: PathBuf,
}

/// Rendering defaults, overridable on the command line
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// "fit" or "pad"
    pub method: String,

    pub brightness: f32,

    /// Where the preview panel writes its frames
    pub preview_dir: PathBuf,
}

/// Where the frame lives, for both weather and sun position
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,

    /// Name of the environment variable holding the API key
    pub api_key_env: String,

    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub base_url: String,

    /// Name of the environment variable holding the API key
    pub api_key_env: String,

    pub model: String,
    pub size: String,
    pub quality: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PromptConfig {
    /// Tera template rendered with `setting`, `season`, `time_of_day`,
    /// `weather` and `moon_phase`
    pub template: String,

    /// Setting key (used in cache file names) to scene description
    pub settings: BTreeMap<String, String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            method: "fit".to_string(),
            brightness: 1.0,
            preview_dir: PathBuf::from("preview"),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        // Thessaloniki
        Self {
            latitude: 40.597215,
            longitude: 22.950262,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openweathermap.org".to_string(),
            api_key_env: "OPENWEATHER_API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            model: "dall-e-3".to_string(),
            size: "1024x1024".to_string(),
            quality: "standard".to_string(),
            timeout_secs: 120,
        }
    }
}

pub const DEFAULT_PROMPT_TEMPLATE: &str = "A calm, relaxing painting by Albert Bierstadt, of {{ setting }} in the {{ season }}, at {{ time_of_day }}, with weather: {{ weather }}";

impl Default for PromptConfig {
    fn default() -> Self {
        let settings = [
            ("mountains", "snow-capped mountains"),
            ("lake", "a lake surrounded by trees"),
            ("forest", "a dense forest"),
            ("meadow", "a meadow with wildflowers"),
            ("beach", "a beach with soft, white sand"),
            ("river", "a river flowing through the countryside"),
            ("garden", "a well-kept garden"),
            ("waterfall", "a waterfall in a tropical setting"),
            ("island", "a secluded island with clear blue waters"),
            ("canyon", "a vast canyon with a stunning view"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            template: DEFAULT_PROMPT_TEMPLATE.to_string(),
            settings,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            location: LocationConfig::default(),
            weather: WeatherConfig::default(),
            generator: GeneratorConfig::default(),
            prompt: PromptConfig::default(),
            cache_dir: PathBuf::from("image_cache"),
        }
    }
}

impl AppConfig {
    /// Parse a YAML document. Missing sections and fields take defaults.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load configuration, falling back to defaults when there is no file
    /// or it cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file, using defaults");
            return Self::default();
        };

        match Self::from_file(path) {
            Ok(config) => {
                tracing::info!(
                    path = %path.display(),
                    settings = config.prompt.settings.len(),
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), %e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Pick the config file: explicit path, then `CONFIG_FILE`, then
    /// `inkframe.yaml` in the working directory if it exists.
    pub fn resolve_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit
            .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from))
            .or_else(|| {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                local.exists().then_some(local)
            })
    }
}
