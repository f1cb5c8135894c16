//! Image generation through an OpenAI-compatible images endpoint.

use std::time::Duration;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::AcquireError;
use crate::models::GeneratorConfig;

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
    quality: &'a str,
    response_format: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    b64_json: Option<String>,
}

/// Blocking client that turns a prompt into encoded image bytes.
pub struct ImageGenerator {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    model: String,
    size: String,
    quality: String,
}

impl ImageGenerator {
    pub fn new(config: &GeneratorConfig, api_key: String) -> Result<Self, AcquireError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            size: config.size.clone(),
            quality: config.quality.clone(),
        })
    }

    /// Generate one image and return its encoded bytes (usually PNG).
    pub fn generate(&self, prompt: &str) -> Result<Vec<u8>, AcquireError> {
        let url = format!("{}/v1/images/generations", self.base_url);
        tracing::info!(model = %self.model, size = %self.size, "Requesting generated image");

        let request = GenerationRequest {
            model: &self.model,
            prompt,
            n: 1,
            size: &self.size,
            quality: &self.quality,
            response_format: "b64_json",
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AcquireError::Api(format!("generation: {status}: {body}")));
        }

        let body: GenerationResponse = response
            .json()
            .map_err(|e| AcquireError::Decode(format!("generation response: {e}")))?;

        let encoded = body
            .data
            .into_iter()
            .next()
            .and_then(|d| d.b64_json)
            .ok_or_else(|| AcquireError::Api("generation: response has no image".to_string()))?;

        let bytes = base64::engine::general_purpose::STANDARD.decode(encoded.trim())?;
        tracing::debug!(bytes = bytes.len(), "Generated image received");
        Ok(bytes)
    }
}
