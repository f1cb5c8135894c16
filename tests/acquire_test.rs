//! Weather-conditioned acquisition against mocked weather and image APIs.
//!
//! The HTTP clients are blocking, so each acquisition runs on the blocking
//! pool while the mock server keeps serving on the runtime.

mod common;

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use common::fixtures::{generation_json, gradient, weather_json};
use common::mock_server::MockHttpServer;
use inkframe::error::AcquireError;
use inkframe::models::{AppConfig, Season, TimeOfDay};
use inkframe::services::{Acquired, ImageAcquirer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

const WEATHER_KEY: &str = "weather-test-key";
const GENERATOR_KEY: &str = "sk-test";

/// Midday on the summer solstice at the default location.
fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 21, 10, 0, 0).unwrap()
}

fn config(server: &MockHttpServer, cache: &TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.weather.base_url = server.url();
    config.generator.base_url = server.url();
    config.cache_dir = cache.path().to_path_buf();
    config.prompt.settings = BTreeMap::from([(
        "lake".to_string(),
        "a lake surrounded by trees".to_string(),
    )]);
    config
}

async fn acquire(
    config: AppConfig,
    generator_key: Option<&'static str>,
) -> Result<Acquired, AcquireError> {
    tokio::task::spawn_blocking(move || {
        let acquirer = ImageAcquirer::with_keys(
            &config,
            WEATHER_KEY.to_string(),
            generator_key.map(str::to_string),
        )?;
        acquirer.acquire(noon(), &mut StdRng::seed_from_u64(7))
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cache_miss_generates_and_stores() {
    let server = MockHttpServer::start().await;
    let cache = TempDir::new().unwrap();
    server
        .mock_weather(WEATHER_KEY, weather_json("scattered clouds"))
        .await;
    server
        .mock_generation(GENERATOR_KEY, generation_json(&gradient(64, 64)), 1)
        .await;

    let acquired = acquire(config(&server, &cache), Some(GENERATOR_KEY))
        .await
        .unwrap();

    assert!(!acquired.cached);
    assert_eq!(acquired.conditions.season, Season::Summer);
    assert_eq!(acquired.conditions.time_of_day, TimeOfDay::Day);
    assert_eq!(acquired.conditions.weather, "scattered clouds");
    assert_eq!(
        acquired.path,
        cache.path().join("lake-summer-day-scattered-clouds.jpg")
    );
    assert_eq!(
        acquired.prompt,
        "A calm, relaxing painting by Albert Bierstadt, of a lake surrounded by trees \
         in the summer, at day, with weather: scattered clouds"
    );

    let stored = image::open(&acquired.path).unwrap();
    assert_eq!((stored.width(), stored.height()), (64, 64));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_second_call_is_a_cache_hit() {
    let server = MockHttpServer::start().await;
    let cache = TempDir::new().unwrap();
    server
        .mock_weather(WEATHER_KEY, weather_json("clear sky"))
        .await;
    // Exactly one generation across both calls
    server
        .mock_generation(GENERATOR_KEY, generation_json(&gradient(32, 32)), 1)
        .await;

    let first = acquire(config(&server, &cache), Some(GENERATOR_KEY))
        .await
        .unwrap();
    let second = acquire(config(&server, &cache), Some(GENERATOR_KEY))
        .await
        .unwrap();

    assert!(!first.cached);
    assert!(second.cached);
    assert_eq!(first.path, second.path);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cache_hit_needs_no_generator_key() {
    let server = MockHttpServer::start().await;
    let cache = TempDir::new().unwrap();
    server
        .mock_weather(WEATHER_KEY, weather_json("light rain"))
        .await;
    let cached = cache.path().join("lake-summer-day-light-rain.jpg");
    gradient(16, 16).to_rgb8().save(&cached).unwrap();

    let acquired = acquire(config(&server, &cache), None).await.unwrap();

    assert!(acquired.cached);
    assert_eq!(acquired.path, cached);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cache_miss_without_generator_key() {
    let server = MockHttpServer::start().await;
    let cache = TempDir::new().unwrap();
    server
        .mock_weather(WEATHER_KEY, weather_json("overcast clouds"))
        .await;

    let result = acquire(config(&server, &cache), None).await;

    match result {
        Err(AcquireError::MissingApiKey(var)) => assert_eq!(var, "OPENAI_API_KEY"),
        other => panic!("Expected missing key error, got {other:?}"),
    }
    assert_eq!(std::fs::read_dir(cache.path()).unwrap().count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_weather_api_error() {
    let server = MockHttpServer::start().await;
    let cache = TempDir::new().unwrap();
    server
        .mock_error("GET", "/data/3.0/onecall", 401, "Invalid API key")
        .await;

    let result = acquire(config(&server, &cache), Some(GENERATOR_KEY)).await;

    match result {
        Err(AcquireError::Api(message)) => {
            assert!(message.contains("401"), "{message}");
            assert!(message.contains("Invalid API key"), "{message}");
        }
        other => panic!("Expected API error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_weather_without_current_conditions() {
    let server = MockHttpServer::start().await;
    let cache = TempDir::new().unwrap();
    let mut body = weather_json("unused");
    body["current"]["weather"] = serde_json::json!([]);
    server.mock_weather(WEATHER_KEY, body).await;

    let result = acquire(config(&server, &cache), Some(GENERATOR_KEY)).await;

    assert!(matches!(result, Err(AcquireError::Api(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generation_error_stores_nothing() {
    let server = MockHttpServer::start().await;
    let cache = TempDir::new().unwrap();
    server
        .mock_weather(WEATHER_KEY, weather_json("mist"))
        .await;
    server
        .mock_error("POST", "/v1/images/generations", 500, "upstream failure")
        .await;

    let result = acquire(config(&server, &cache), Some(GENERATOR_KEY)).await;

    assert!(matches!(result, Err(AcquireError::Api(_))));
    assert_eq!(std::fs::read_dir(cache.path()).unwrap().count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generation_with_bad_image_data() {
    let server = MockHttpServer::start().await;
    let cache = TempDir::new().unwrap();
    server
        .mock_weather(WEATHER_KEY, weather_json("haze"))
        .await;
    server
        .mock_generation(
            GENERATOR_KEY,
            serde_json::json!({"created": 0, "data": [{"b64_json": "aGVsbG8="}]}),
            1,
        )
        .await;

    let result = acquire(config(&server, &cache), Some(GENERATOR_KEY)).await;

    assert!(matches!(result, Err(AcquireError::Decode(_))));
    assert_eq!(std::fs::read_dir(cache.path()).unwrap().count(), 0);
}
