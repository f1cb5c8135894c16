//! Current weather from the OpenWeather One Call API.

use std::time::Duration;

use serde::Deserialize;

use crate::error::AcquireError;
use crate::models::{LocationConfig, WeatherConfig};

#[derive(Debug, Deserialize)]
struct OneCallResponse {
    current: Current,
}

#[derive(Debug, Deserialize)]
struct Current {
    #[serde(default)]
    weather: Vec<WeatherEntry>,
}

#[derive(Debug, Deserialize)]
struct WeatherEntry {
    description: String,
}

/// Blocking client for the current-conditions endpoint.
pub struct WeatherClient {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    latitude: f64,
    longitude: f64,
}

impl WeatherClient {
    pub fn new(
        config: &WeatherConfig,
        location: &LocationConfig,
        api_key: String,
    ) -> Result<Self, AcquireError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            latitude: location.latitude,
            longitude: location.longitude,
        })
    }

    /// Short description of the current weather, e.g. "broken clouds".
    pub fn current_description(&self) -> Result<String, AcquireError> {
        let url = format!("{}/data/3.0/onecall", self.base_url);
        tracing::debug!(url = %url, lat = self.latitude, lon = self.longitude, "Fetching weather");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", self.latitude.to_string()),
                ("lon", self.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("exclude", "minutely,daily,hourly,alerts".to_string()),
                ("units", "metric".to_string()),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AcquireError::Api(format!("weather: {status}: {body}")));
        }

        let body: OneCallResponse = response
            .json()
            .map_err(|e| AcquireError::Decode(format!("weather response: {e}")))?;

        let description = body
            .current
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| AcquireError::Api("weather: no current conditions".to_string()))?;

        tracing::info!(weather = %description, "Current weather");
        Ok(description)
    }
}
