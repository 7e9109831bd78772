//! Integration tests for Agrow.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p agrow-integration-tests
//! ```
//!
//! Every test builds its own [`TestContext`]: a `wiremock` server standing in
//! for both data providers and an in-memory `axum-test` server that keeps
//! cookies between requests, so one context is one browser session.
//!
//! # Test Categories
//!
//! - `auth_flow` - Guard, login, onboarding and logout
//! - `dashboard` - Weather and market panels
//! - `crop_prices` - Price explorer, filters and provider failures
//! - `disease_detection` - Uploads and detection history
//! - `chatbot` - Scripted assistant transcript
//! - `preferences` - Language switcher, settings and the 404 page

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::time::Duration;

use axum_test::{TestResponse, TestServer};
use secrecy::SecretString;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use agrow_web::config::{AgrowConfig, MarketConfig, WeatherConfig};
use agrow_web::state::AppState;

/// Resource id the market mock answers for.
pub const MARKET_RESOURCE_ID: &str = "test-resource";

/// Path of the market resource on the mock server.
pub const MARKET_PATH: &str = "/resource/test-resource";

/// Path of the forecast endpoint on the mock server.
pub const FORECAST_PATH: &str = "/v4/weather/forecast";

/// A running app wired to mocked providers.
pub struct TestContext {
    pub providers: MockServer,
    pub server: TestServer,
}

impl TestContext {
    /// App without a weather API key.
    pub async fn new() -> Self {
        Self::build(None).await
    }

    /// App with a weather API key, so forecasts hit the mock server.
    pub async fn with_weather() -> Self {
        Self::build(Some("test-weather-key")).await
    }

    async fn build(weather_key: Option<&str>) -> Self {
        let providers = MockServer::start().await;
        let state = AppState::new(test_config(&providers.uri(), weather_key))
            .expect("Failed to build application state");
        let server = TestServer::builder()
            .save_cookies()
            .build(agrow_web::app(state))
            .expect("Failed to start test server");

        Self { providers, server }
    }

    /// Answer every market request with `records`.
    pub async fn mount_market(&self, records: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path(MARKET_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "records": records })))
            .mount(&self.providers)
            .await;
    }

    /// Answer every market request with `status`.
    pub async fn mount_market_failure(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path(MARKET_PATH))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.providers)
            .await;
    }

    /// Answer every forecast request with `days` days of mild weather.
    pub async fn mount_forecast(&self, days: usize) {
        Mock::given(method("GET"))
            .and(path(FORECAST_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(days)))
            .mount(&self.providers)
            .await;
    }

    /// Sign in through the login form.
    pub async fn login(&self, username: &str) -> TestResponse {
        self.server
            .post("/auth/login")
            .form(&[("username", username), ("password", "secret1")])
            .await
    }

    /// Sign in and complete both onboarding steps.
    pub async fn onboard(&self, district: &str, crops: &[&str]) {
        self.login("ravi").await;
        self.server
            .post("/region-selection")
            .form(&[("state", "Maharashtra"), ("district", district)])
            .await;

        let form: Vec<(&str, &str)> = crops.iter().map(|c| ("crops", *c)).collect();
        self.server.post("/crop-selection").form(&form).await;
    }
}

/// Configuration pointing both providers at `providers_uri`.
#[must_use]
pub fn test_config(providers_uri: &str, weather_key: Option<&str>) -> AgrowConfig {
    AgrowConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../web/static")),
        weather: WeatherConfig {
            base_url: providers_uri.to_string(),
            api_key: weather_key.map(SecretString::from),
            fallback_location: "18.5204,73.8567".to_string(),
        },
        market: MarketConfig {
            base_url: providers_uri.to_string(),
            resource_id: MARKET_RESOURCE_ID.to_string(),
            api_key: SecretString::from("test-market-key"),
            state: "Maharashtra".to_string(),
            limit: 100,
            cache_ttl: Duration::from_secs(300),
        },
        http_timeout: Duration::from_secs(5),
        diagnosis_delay: Duration::ZERO,
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// One market record as the provider sends it: every field a string.
#[must_use]
pub fn market_record(
    district: &str,
    market: &str,
    commodity: &str,
    min: &str,
    max: &str,
    modal: &str,
) -> Value {
    json!({
        "state": "Maharashtra",
        "district": district,
        "market": market,
        "commodity": commodity,
        "variety": "Local",
        "grade": "FAQ",
        "arrival_date": "15/09/2025",
        "min_price": min,
        "max_price": max,
        "modal_price": modal,
    })
}

/// A small feed spanning two districts.
#[must_use]
pub fn sample_records() -> Vec<Value> {
    vec![
        market_record("Pune", "Pune", "Onion", "1200", "1800", "1500"),
        market_record("Pune", "Manchar", "Potato", "900", "1300", "1100"),
        market_record("Nashik", "Lasalgaon", "Onion", "1100", "1700", "1400"),
        market_record("Nashik", "Pimpalgaon", "Grapes", "3000", "4200", "3600"),
    ]
}

/// A provider forecast body with `days` daily entries from 15 September.
#[must_use]
pub fn forecast_body(days: usize) -> Value {
    let daily: Vec<Value> = (0..days)
        .map(|i| {
            json!({
                "time": format!("2025-09-{:02}T01:00:00Z", 15 + i),
                "values": {
                    "temperatureAvg": 27.4,
                    "temperatureMin": 22.1,
                    "temperatureMax": 31.0,
                    "precipitationProbabilityAvg": 20.0,
                    "rainAccumulationSum": 0.4,
                    "cloudCoverAvg": 35.0,
                    "humidityAvg": 71.0,
                    "windSpeedAvg": 3.5,
                    "weatherCodeMax": 1100,
                }
            })
        })
        .collect();

    json!({ "timelines": { "daily": daily } })
}

/// The `Location` header of a redirect.
#[must_use]
pub fn location(response: &TestResponse) -> String {
    response
        .header("location")
        .to_str()
        .expect("Location header is not ASCII")
        .to_string()
}
