//! Weather forecast adapter.
//!
//! Fetches a daily forecast from a tomorrow.io compatible endpoint and
//! normalizes it into at most seven [`ForecastDay`] records.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use crate::config::WeatherConfig;
use crate::services::FetchError;

/// Daily fields requested from the provider.
const FORECAST_FIELDS: &str = "temperatureAvg,temperatureMin,temperatureMax,\
precipitationProbabilityAvg,rainAccumulationSum,cloudCoverAvg,humidityAvg,\
windSpeedAvg,weatherCodeMax";

/// Maximum number of days shown.
pub const MAX_FORECAST_DAYS: usize = 7;

/// Percentage above which precipitation or cloud cover decides the description.
const DESCRIPTION_THRESHOLD: f64 = 60.0;

// =============================================================================
// Display model
// =============================================================================

/// One normalized day of forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    /// "Today", "Tomorrow", or the short weekday name.
    pub label: String,
    /// Calendar date, `None` if the provider timestamp was unreadable.
    pub date: Option<NaiveDate>,
    pub temperature_avg: f64,
    pub temperature_min: f64,
    pub temperature_max: f64,
    /// Percent.
    pub precipitation_probability: f64,
    /// Millimetres.
    pub rain_accumulation: f64,
    /// Percent.
    pub cloud_cover: f64,
    /// Percent.
    pub humidity: f64,
    /// Kilometres per hour, one decimal.
    pub wind_speed_kmh: f64,
    pub weather_code: Option<i64>,
    pub description: &'static str,
}

impl ForecastDay {
    /// Date formatted like `19 Sep`.
    #[must_use]
    pub fn short_date(&self) -> String {
        self.date
            .map(|d| d.format("%d %b").to_string())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn temperature_range(&self) -> String {
        format!(
            "{:.0}° / {:.0}°",
            self.temperature_max, self.temperature_min
        )
    }
}

/// Pick a description from precipitation probability and cloud cover.
#[must_use]
pub fn describe(precipitation_probability: f64, cloud_cover: f64) -> &'static str {
    if precipitation_probability > DESCRIPTION_THRESHOLD {
        "rain likely"
    } else if cloud_cover > DESCRIPTION_THRESHOLD {
        "cloudy"
    } else {
        "clear"
    }
}

/// Convert metres per second to kilometres per hour, rounded to one decimal.
#[must_use]
pub fn to_kmh(metres_per_second: f64) -> f64 {
    (metres_per_second * 3.6 * 10.0).round() / 10.0
}

// =============================================================================
// Provider response
// =============================================================================

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    timelines: Timelines,
}

#[derive(Debug, Deserialize)]
struct Timelines {
    #[serde(default)]
    daily: Vec<RawDay>,
}

#[derive(Debug, Deserialize)]
struct RawDay {
    time: String,
    #[serde(default)]
    values: RawValues,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawValues {
    temperature_avg: Option<f64>,
    temperature_min: Option<f64>,
    temperature_max: Option<f64>,
    precipitation_probability_avg: Option<f64>,
    rain_accumulation_sum: Option<f64>,
    cloud_cover_avg: Option<f64>,
    humidity_avg: Option<f64>,
    wind_speed_avg: Option<f64>,
    weather_code_max: Option<i64>,
}

fn normalize(days: Vec<RawDay>) -> Vec<ForecastDay> {
    days.into_iter()
        .take(MAX_FORECAST_DAYS)
        .enumerate()
        .map(|(index, day)| {
            let date = DateTime::parse_from_rfc3339(&day.time)
                .map(|t| t.date_naive())
                .or_else(|_| NaiveDate::parse_from_str(&day.time, "%Y-%m-%d"))
                .ok();
            let label = match index {
                0 => "Today".to_string(),
                1 => "Tomorrow".to_string(),
                _ => date.map(|d| d.format("%a").to_string()).unwrap_or_default(),
            };

            let v = day.values;
            let precipitation_probability = v.precipitation_probability_avg.unwrap_or(0.0);
            let cloud_cover = v.cloud_cover_avg.unwrap_or(0.0);

            ForecastDay {
                label,
                date,
                temperature_avg: v.temperature_avg.unwrap_or(0.0),
                temperature_min: v.temperature_min.unwrap_or(0.0),
                temperature_max: v.temperature_max.unwrap_or(0.0),
                precipitation_probability,
                rain_accumulation: v.rain_accumulation_sum.unwrap_or(0.0),
                cloud_cover,
                humidity: v.humidity_avg.unwrap_or(0.0),
                wind_speed_kmh: to_kmh(v.wind_speed_avg.unwrap_or(0.0)),
                weather_code: v.weather_code_max,
                description: describe(precipitation_probability, cloud_cover),
            }
        })
        .collect()
}

// =============================================================================
// WeatherClient
// =============================================================================

/// Client for the forecast provider.
#[derive(Clone)]
pub struct WeatherClient {
    inner: Arc<WeatherClientInner>,
}

struct WeatherClientInner {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
    fallback_location: String,
}

impl WeatherClient {
    /// Create a new forecast client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &WeatherConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            inner: Arc::new(WeatherClientInner {
                client,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                api_key: config.api_key.clone(),
                fallback_location: config.fallback_location.clone(),
            }),
        })
    }

    /// Pick the forecast location: district, then city, then the fallback.
    #[must_use]
    pub fn resolve_location<'a>(
        &'a self,
        district: Option<&'a str>,
        city: Option<&'a str>,
    ) -> &'a str {
        district
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .or_else(|| city.map(str::trim).filter(|c| !c.is_empty()))
            .unwrap_or(&self.inner.fallback_location)
    }

    /// Fetch up to seven days of forecast for `location`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::NotConfigured` without a network call when no API
    /// key is set, otherwise a transport, status or parse error.
    #[instrument(skip(self))]
    pub async fn forecast(&self, location: &str) -> Result<Vec<ForecastDay>, FetchError> {
        let Some(api_key) = self.inner.api_key.as_ref() else {
            tracing::warn!("WEATHER_API_KEY not set, skipping forecast fetch");
            return Err(FetchError::NotConfigured("weather forecast"));
        };

        self.fetch(location, api_key)
            .await
            .inspect(|days| tracing::debug!(days = days.len(), "Forecast fetched"))
            .inspect_err(|e| tracing::error!(error = %e, "Forecast fetch failed"))
    }

    async fn fetch(
        &self,
        location: &str,
        api_key: &SecretString,
    ) -> Result<Vec<ForecastDay>, FetchError> {
        let url = Url::parse_with_params(
            &format!("{}/v4/weather/forecast", self.inner.base_url),
            &[
                ("location", location),
                ("fields", FORECAST_FIELDS),
                ("timesteps", "1d"),
                ("units", "metric"),
                ("apikey", api_key.expose_secret()),
            ],
        )
        .map_err(|e| FetchError::Transport(e.to_string()))?;

        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        Ok(normalize(body.timelines.daily))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn raw_day(time: &str, values: serde_json::Value) -> RawDay {
        serde_json::from_value(json!({ "time": time, "values": values })).unwrap()
    }

    fn client(base_url: &str, api_key: Option<&str>) -> WeatherClient {
        let config = WeatherConfig {
            base_url: base_url.to_string(),
            api_key: api_key.map(SecretString::from),
            fallback_location: "18.5204,73.8567".to_string(),
        };
        WeatherClient::new(&config, Duration::from_secs(5)).unwrap()
    }

    fn daily_body(days: usize) -> serde_json::Value {
        let daily: Vec<_> = (0..days)
            .map(|i| {
                json!({
                    "time": format!("2025-09-{:02}T01:00:00Z", 15 + i),
                    "values": {
                        "temperatureAvg": 27.4,
                        "temperatureMin": 22.1,
                        "temperatureMax": 31.0,
                        "precipitationProbabilityAvg": 20,
                        "cloudCoverAvg": 30,
                        "humidityAvg": 71,
                        "windSpeedAvg": 2.5,
                        "weatherCodeMax": 1100
                    }
                })
            })
            .collect();
        json!({ "timelines": { "daily": daily } })
    }

    #[test]
    fn test_describe_rain_beats_clouds() {
        assert_eq!(describe(70.0, 90.0), "rain likely");
        assert_eq!(describe(70.0, 0.0), "rain likely");
    }

    #[test]
    fn test_describe_cloudy_and_clear() {
        assert_eq!(describe(10.0, 80.0), "cloudy");
        assert_eq!(describe(60.0, 60.0), "clear");
    }

    #[test]
    fn test_to_kmh_rounds_to_one_decimal() {
        assert!((to_kmh(2.5) - 9.0).abs() < f64::EPSILON);
        assert!((to_kmh(3.33) - 12.0).abs() < f64::EPSILON);
        assert!((to_kmh(1.24) - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_normalize_labels_days() {
        // 2025-09-17 is a Wednesday
        let days = normalize(vec![
            raw_day("2025-09-15T01:00:00Z", json!({})),
            raw_day("2025-09-16T01:00:00Z", json!({})),
            raw_day("2025-09-17T01:00:00Z", json!({})),
        ]);
        assert_eq!(days[0].label, "Today");
        assert_eq!(days[1].label, "Tomorrow");
        assert_eq!(days[2].label, "Wed");
        assert_eq!(days[2].short_date(), "17 Sep");
    }

    #[test]
    fn test_normalize_missing_values_count_as_zero() {
        let days = normalize(vec![raw_day("2025-09-15T01:00:00Z", json!({}))]);
        assert_eq!(days[0].description, "clear");
        assert!(days[0].wind_speed_kmh.abs() < f64::EPSILON);
        assert_eq!(days[0].weather_code, None);
    }

    #[test]
    fn test_normalize_uses_thresholds() {
        let days = normalize(vec![
            raw_day(
                "2025-09-15T01:00:00Z",
                json!({ "precipitationProbabilityAvg": 70, "cloudCoverAvg": 10 }),
            ),
            raw_day(
                "2025-09-16T01:00:00Z",
                json!({ "precipitationProbabilityAvg": 10, "cloudCoverAvg": 80 }),
            ),
        ]);
        assert_eq!(days[0].description, "rain likely");
        assert_eq!(days[1].description, "cloudy");
    }

    #[test]
    fn test_resolve_location_order() {
        let client = client("http://localhost", None);
        assert_eq!(client.resolve_location(Some("Pune"), Some("Nagpur")), "Pune");
        assert_eq!(client.resolve_location(Some(" "), Some("Nagpur")), "Nagpur");
        assert_eq!(client.resolve_location(None, None), "18.5204,73.8567");
    }

    #[tokio::test]
    async fn test_forecast_without_key_is_not_configured() {
        let server = MockServer::start().await;
        let client = client(&server.uri(), None);

        let err = client.forecast("Pune").await.unwrap_err();
        assert!(matches!(err, FetchError::NotConfigured(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_forecast_truncates_to_seven_days() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/weather/forecast"))
            .and(query_param("location", "Pune"))
            .and(query_param("timesteps", "1d"))
            .and(query_param("units", "metric"))
            .and(query_param("apikey", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(daily_body(10)))
            .mount(&server)
            .await;

        let days = client(&server.uri(), Some("test-key"))
            .forecast("Pune")
            .await
            .unwrap();

        assert_eq!(days.len(), MAX_FORECAST_DAYS);
        assert!((days[0].wind_speed_kmh - 9.0).abs() < f64::EPSILON);
        assert_eq!(days[0].weather_code, Some(1100));
    }

    #[tokio::test]
    async fn test_forecast_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/weather/forecast"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client(&server.uri(), Some("bad-key"))
            .forecast("Pune")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 401 }));
    }

    #[tokio::test]
    async fn test_forecast_unexpected_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/weather/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&server)
            .await;

        let err = client(&server.uri(), Some("test-key"))
            .forecast("Pune")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }
}
