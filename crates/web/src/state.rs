//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AgrowConfig;
use crate::diagnosis::{DiseaseClassifier, SimulatedClassifier};
use crate::market::MarketClient;
use crate::weather::WeatherClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration, the data adapters
/// and the disease classifier.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AgrowConfig,
    weather: WeatherClient,
    market: MarketClient,
    classifier: Arc<dyn DiseaseClassifier>,
}

impl AppState {
    /// Create the application state with the simulated classifier.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built.
    pub fn new(config: AgrowConfig) -> Result<Self, reqwest::Error> {
        let classifier = Arc::new(SimulatedClassifier::new(config.diagnosis_delay));
        Self::with_classifier(config, classifier)
    }

    /// Create the application state with a specific classifier.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built.
    pub fn with_classifier(
        config: AgrowConfig,
        classifier: Arc<dyn DiseaseClassifier>,
    ) -> Result<Self, reqwest::Error> {
        let weather = WeatherClient::new(&config.weather, config.http_timeout)?;
        let market = MarketClient::new(&config.market, config.http_timeout)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                weather,
                market,
                classifier,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AgrowConfig {
        &self.inner.config
    }

    /// Get a reference to the forecast client.
    #[must_use]
    pub fn weather(&self) -> &WeatherClient {
        &self.inner.weather
    }

    /// Get a reference to the market-price client.
    #[must_use]
    pub fn market(&self) -> &MarketClient {
        &self.inner.market
    }

    #[must_use]
    pub fn classifier(&self) -> &dyn DiseaseClassifier {
        self.inner.classifier.as_ref()
    }
}
