//! Weather-conditioned image acquisition: cache first, generate on a miss.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use rand::Rng;

use super::{sky, ImageCache, ImageGenerator, PromptBuilder, WeatherClient};
use crate::error::AcquireError;
use crate::models::{AppConfig, Conditions, LocationConfig, Season};

/// Result of one acquisition.
#[derive(Debug, Clone)]
pub struct Acquired {
    /// Readable image file for the rendering pipeline
    pub path: PathBuf,
    pub conditions: Conditions,
    pub prompt: String,
    /// Whether the image came from the cache
    pub cached: bool,
}

pub struct ImageAcquirer {
    weather: WeatherClient,
    generator: Option<ImageGenerator>,
    generator_key_env: String,
    prompts: PromptBuilder,
    cache: ImageCache,
    location: LocationConfig,
}

fn api_key_from_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|k| !k.trim().is_empty())
}

impl ImageAcquirer {
    /// Build from configuration, reading API keys from the environment.
    ///
    /// The weather key is required. The generation key is only needed on a
    /// cache miss, so its absence is reported then.
    pub fn from_config(config: &AppConfig) -> Result<Self, AcquireError> {
        let weather_key = api_key_from_env(&config.weather.api_key_env)
            .ok_or_else(|| AcquireError::MissingApiKey(config.weather.api_key_env.clone()))?;
        let generator_key = api_key_from_env(&config.generator.api_key_env);
        Self::with_keys(config, weather_key, generator_key)
    }

    pub fn with_keys(
        config: &AppConfig,
        weather_key: String,
        generator_key: Option<String>,
    ) -> Result<Self, AcquireError> {
        let generator = generator_key
            .map(|key| ImageGenerator::new(&config.generator, key))
            .transpose()?;

        Ok(Self {
            weather: WeatherClient::new(&config.weather, &config.location, weather_key)?,
            generator,
            generator_key_env: config.generator.api_key_env.clone(),
            prompts: PromptBuilder::new(&config.prompt),
            cache: ImageCache::new(&config.cache_dir),
            location: config.location.clone(),
        })
    }

    pub fn cache(&self) -> &ImageCache {
        &self.cache
    }

    /// Gather the conditions at `now`: random setting, season, sun and
    /// moon position, current weather.
    pub fn conditions<R: Rng + ?Sized>(
        &self,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Conditions, AcquireError> {
        let (setting, description) = self
            .prompts
            .choose_setting(rng)
            .ok_or_else(|| AcquireError::Api("no settings configured".to_string()))?;
        let (setting, description) = (setting.to_string(), description.to_string());

        let weather = self.weather.current_description()?;
        let (lat, lon) = (self.location.latitude, self.location.longitude);

        Ok(Conditions {
            setting,
            setting_description: description,
            season: Season::at(now),
            time_of_day: sky::time_of_day(now, lat, lon),
            moon_phase: sky::moon_phase(now),
            weather,
        })
    }

    /// Produce a readable image file for the conditions at `now`.
    pub fn acquire<R: Rng + ?Sized>(
        &self,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Acquired, AcquireError> {
        let conditions = self.conditions(now, rng)?;
        let prompt = self.prompts.render(&conditions)?;
        tracing::info!(
            setting = %conditions.setting,
            season = %conditions.season,
            time_of_day = %conditions.time_of_day,
            moon_phase = %conditions.moon_phase,
            "Conditions"
        );

        if let Some(path) = self.cache.lookup(&conditions) {
            tracing::info!(path = %path.display(), "Cache hit");
            return Ok(Acquired {
                path,
                conditions,
                prompt,
                cached: true,
            });
        }

        tracing::info!(prompt = %prompt, "Cache miss, generating");
        let generator = self
            .generator
            .as_ref()
            .ok_or_else(|| AcquireError::MissingApiKey(self.generator_key_env.clone()))?;
        let bytes = generator.generate(&prompt)?;
        let path = self.cache.store(&conditions, &bytes)?;

        Ok(Acquired {
            path,
            conditions,
            prompt,
            cached: false,
        })
    }
}
