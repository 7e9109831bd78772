//! Government market-price adapter.
//!
//! Fetches daily mandi prices from the data.gov.in resource API. The fetched
//! set is cached with `moka` (5-minute TTL by default) per state filter; the
//! crop-prices page filters it in memory without refetching.

mod conversions;
pub mod filter;

pub use filter::{FilterQuery, MarketFilters, MarketStats, MarketView};

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;
use url::Url;

use agrow_core::Price;

use crate::config::MarketConfig;
use crate::services::FetchError;

use conversions::{RecordsResponse, convert_record};

/// One daily price quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketRecord {
    pub state: String,
    pub district: String,
    pub market: String,
    pub commodity: String,
    pub variety: String,
    pub grade: String,
    /// As sent by the provider, `dd/mm/yyyy`.
    pub arrival_date: String,
    pub min_price: Price,
    pub max_price: Price,
    pub modal_price: Price,
}

// =============================================================================
// MarketClient
// =============================================================================

/// Client for the market-price resource API.
#[derive(Clone)]
pub struct MarketClient {
    inner: Arc<MarketClientInner>,
}

struct MarketClientInner {
    client: reqwest::Client,
    endpoint: String,
    api_key: SecretString,
    state: String,
    limit: u32,
    cache: Cache<String, Arc<Vec<MarketRecord>>>,
}

impl MarketClient {
    /// Create a new market-price client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &MarketConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(MarketClientInner {
                client,
                endpoint: format!(
                    "{}/resource/{}",
                    config.base_url.trim_end_matches('/'),
                    config.resource_id
                ),
                api_key: config.api_key.clone(),
                state: config.state.clone(),
                limit: config.limit,
                cache,
            }),
        })
    }

    /// The configured state filter.
    #[must_use]
    pub fn state(&self) -> &str {
        &self.inner.state
    }

    /// Records for the configured state, served from cache when fresh.
    ///
    /// Concurrent callers share one in-flight fetch. Failures are not cached.
    ///
    /// # Errors
    ///
    /// Returns a transport, status, parse or missing-records error.
    #[instrument(skip(self), fields(state = %self.inner.state))]
    pub async fn records(&self) -> Result<Arc<Vec<MarketRecord>>, FetchError> {
        let key = self.inner.state.clone();

        self.inner
            .cache
            .try_get_with(key, async {
                self.fetch_records()
                    .await
                    .map(Arc::new)
                    .inspect(|records| tracing::debug!(count = records.len(), "Market records fetched"))
                    .inspect_err(|e| tracing::error!(error = %e, "Market fetch failed"))
            })
            .await
            .map_err(|e: Arc<FetchError>| (*e).clone())
    }

    async fn fetch_records(&self) -> Result<Vec<MarketRecord>, FetchError> {
        let limit = self.inner.limit.to_string();
        let url = Url::parse_with_params(
            &self.inner.endpoint,
            &[
                ("api-key", self.inner.api_key.expose_secret()),
                ("format", "json"),
                ("limit", limit.as_str()),
                ("filters[state.keyword]", self.inner.state.as_str()),
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

        let body: RecordsResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        let records = body.records.ok_or(FetchError::MissingRecords)?;
        Ok(records.into_iter().map(convert_record).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const RESOURCE: &str = "test-resource";

    fn client(base_url: &str) -> MarketClient {
        let config = MarketConfig {
            base_url: base_url.to_string(),
            resource_id: RESOURCE.to_string(),
            api_key: SecretString::from("test-key"),
            state: "Maharashtra".to_string(),
            limit: 100,
            cache_ttl: Duration::from_secs(300),
        };
        MarketClient::new(&config, Duration::from_secs(5)).unwrap()
    }

    fn records_body() -> serde_json::Value {
        json!({
            "records": [
                {
                    "state": "Maharashtra", "district": "Pune", "market": "Pune",
                    "commodity": "Onion", "variety": "Red", "grade": "FAQ",
                    "arrival_date": "19/09/2025",
                    "min_price": "1200", "max_price": "1800", "modal_price": "1500"
                },
                {
                    "state": "Maharashtra", "district": "Nashik", "market": "Lasalgaon",
                    "commodity": "Onion", "variety": "Red", "grade": "FAQ",
                    "arrival_date": "19/09/2025",
                    "min_price": "1100", "max_price": "1700", "modal_price": "1450"
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_records_sends_query_and_parses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/resource/{RESOURCE}")))
            .and(query_param("api-key", "test-key"))
            .and(query_param("format", "json"))
            .and(query_param("limit", "100"))
            .and(query_param("filters[state.keyword]", "Maharashtra"))
            .respond_with(ResponseTemplate::new(200).set_body_json(records_body()))
            .mount(&server)
            .await;

        let records = client(&server.uri()).records().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].market, "Lasalgaon");
        assert_eq!(records[0].modal_price, Price::from_provider("1500"));
    }

    #[tokio::test]
    async fn test_records_are_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/resource/{RESOURCE}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(records_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server.uri());
        client.records().await.unwrap();
        client.records().await.unwrap();
    }

    #[tokio::test]
    async fn test_http_error_is_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client(&server.uri()).records().await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500 }));
    }

    #[tokio::test]
    async fn test_missing_records_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
            .mount(&server)
            .await;

        let err = client(&server.uri()).records().await.unwrap_err();
        assert!(matches!(err, FetchError::MissingRecords));
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(records_body()))
            .mount(&server)
            .await;

        let client = client(&server.uri());
        assert!(client.records().await.is_err());
        assert_eq!(client.records().await.unwrap().len(), 2);
    }
}
