//! Mock HTTP server for the weather and image generation APIs.

use wiremock::{
    matchers::{body_partial_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

/// Wrapper around wiremock MockServer with convenience methods
pub struct MockHttpServer {
    pub server: MockServer,
}

impl MockHttpServer {
    /// Start a new mock HTTP server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Get the base URL of the mock server
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Mock the One Call endpoint for one API key
    pub async fn mock_weather(&self, api_key: &str, response: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/data/3.0/onecall"))
            .and(query_param("appid", api_key))
            .and(query_param("units", "metric"))
            .and(query_param("exclude", "minutely,daily,hourly,alerts"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(response)
                    .insert_header("content-type", "application/json"),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock the images endpoint; expects a bearer key and b64 output.
    /// Fails the test on drop unless called exactly `times` times.
    pub async fn mock_generation(&self, api_key: &str, response: serde_json::Value, times: u64) {
        Mock::given(method("POST"))
            .and(path("/v1/images/generations"))
            .and(header("authorization", format!("Bearer {}", api_key)))
            .and(body_partial_json(serde_json::json!({
                "response_format": "b64_json"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(response)
                    .insert_header("content-type", "application/json"),
            )
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Mock an endpoint that returns an error
    pub async fn mock_error(&self, http_method: &str, endpoint: &str, status: u16, message: &str) {
        Mock::given(method(http_method))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_string(message))
            .mount(&self.server)
            .await;
    }
}
