//! Dashboard: forecast and mandi prices for the onboarding selection.
//!
//! The forecast and the market records are fetched concurrently; each fills
//! its own panel and fails independently of the other.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::market::MarketRecord;
use crate::middleware::{PageContext, RequireAuth};
use crate::services::onboarding::OnboardingSession;
use crate::services::{Panel, PanelStatus};
use crate::state::AppState;
use crate::weather::ForecastDay;

/// Number of price rows shown on the dashboard.
const MARKET_PREVIEW_ROWS: usize = 6;

/// Number of crops with a yield estimate.
const YIELD_PREVIEW_CROPS: usize = 3;

// =============================================================================
// Advisory content (static)
// =============================================================================

pub struct Recommendation {
    pub crop: &'static str,
    pub score: u8,
    pub risk: &'static str,
    pub reason: &'static str,
}

pub struct DiseaseAlert {
    pub crop: &'static str,
    pub disease: &'static str,
    pub severity: &'static str,
    pub action: &'static str,
}

pub struct YieldEstimate {
    pub crop: String,
    pub min: &'static str,
    pub likely: &'static str,
    pub max: &'static str,
}

pub struct MonsoonOutlook {
    pub prediction: &'static str,
    pub rainfall_progress: u8,
    pub soil_moisture: u8,
}

const RECOMMENDATIONS: [Recommendation; 3] = [
    Recommendation {
        crop: "Soybean",
        score: 92,
        risk: "Low",
        reason: "Ideal monsoon conditions",
    },
    Recommendation {
        crop: "Cotton",
        score: 87,
        risk: "Medium",
        reason: "Good soil moisture",
    },
    Recommendation {
        crop: "Tur",
        score: 85,
        risk: "Low",
        reason: "Perfect temperature range",
    },
];

const DISEASE_ALERTS: [DiseaseAlert; 3] = [
    DiseaseAlert {
        crop: "Rice",
        disease: "Blast",
        severity: "High",
        action: "Spray immediately",
    },
    DiseaseAlert {
        crop: "Cotton",
        disease: "Bollworm",
        severity: "Medium",
        action: "Monitor closely",
    },
    DiseaseAlert {
        crop: "Soybean",
        disease: "Rust",
        severity: "Low",
        action: "Preventive care",
    },
];

const MONSOON: MonsoonOutlook = MonsoonOutlook {
    prediction: "Normal",
    rainfall_progress: 75,
    soil_moisture: 82,
};

fn yield_estimates(crops: &[String]) -> Vec<YieldEstimate> {
    crops
        .iter()
        .take(YIELD_PREVIEW_CROPS)
        .map(|crop| YieldEstimate {
            crop: crop.clone(),
            min: "2.5t",
            likely: "3.2t",
            max: "3.8t",
        })
        .collect()
}

/// Price rows for the dashboard: records of the user's crops when any
/// exist, otherwise the first records of the feed.
fn market_preview(records: &[MarketRecord], crops: &[String]) -> Vec<MarketRecord> {
    let mine: Vec<MarketRecord> = records
        .iter()
        .filter(|r| {
            crops
                .iter()
                .any(|c| r.commodity.eq_ignore_ascii_case(c))
        })
        .take(MARKET_PREVIEW_ROWS)
        .cloned()
        .collect();

    if mine.is_empty() {
        records.iter().take(MARKET_PREVIEW_ROWS).cloned().collect()
    } else {
        mine
    }
}

// =============================================================================
// Templates
// =============================================================================

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub district: String,
    pub crops: Vec<String>,
    pub location: String,
    pub weather: Panel<Vec<ForecastDay>>,
    pub weather_status: PanelStatus,
    pub market: Panel<Vec<MarketRecord>>,
    pub market_status: PanelStatus,
    pub recommendations: &'static [Recommendation],
    pub alerts: &'static [DiseaseAlert],
    pub yields: Vec<YieldEstimate>,
    pub monsoon: &'static MonsoonOutlook,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the dashboard.
#[instrument(skip_all, fields(user_id = %auth.user.id))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    ctx: PageContext,
    session: Session,
) -> Result<impl IntoResponse> {
    let selection = OnboardingSession::new(&session).selection().await?;

    let location = state
        .weather()
        .resolve_location(Some(&selection.district), auth.user.city.as_deref())
        .to_string();

    let (forecast, records) = tokio::join!(
        state.weather().forecast(&location),
        state.market().records()
    );

    let weather = Panel::from_list(forecast, |days| days);
    let market = Panel::from_list(
        records.map(|all| market_preview(&all, &selection.crops)),
        |rows| rows,
    );

    Ok(DashboardTemplate {
        ctx,
        weather_status: weather.status(),
        market_status: market.status(),
        yields: yield_estimates(&selection.crops),
        district: selection.district,
        crops: selection.crops,
        location,
        weather,
        market,
        recommendations: &RECOMMENDATIONS,
        alerts: &DISEASE_ALERTS,
        monsoon: &MONSOON,
    })
}
