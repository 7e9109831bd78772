//! Mandi price explorer.
//!
//! Filters narrow the cached record set in memory. A failed fetch replaces
//! the whole page with an error card and a retry link.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, RawQuery, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::instrument;

use crate::market::{FilterQuery, MarketFilters, MarketView};
use crate::middleware::PageContext;
use crate::routes::options::SelectOption;
use crate::services::{Panel, PanelStatus};
use crate::state::AppState;

// =============================================================================
// Templates
// =============================================================================

#[derive(Template, WebTemplate)]
#[template(path = "crop_prices.html")]
pub struct CropPricesTemplate {
    pub ctx: PageContext,
    pub prices: Panel<MarketView>,
    pub status: PanelStatus,
    pub retry_href: String,
    pub states: Vec<SelectOption>,
    pub districts: Vec<SelectOption>,
    pub markets: Vec<SelectOption>,
}

fn options(values: &[String], selected: &str) -> Vec<SelectOption> {
    SelectOption::list(values.iter().map(String::as_str), selected)
}

// =============================================================================
// Handlers
// =============================================================================

/// Display prices for the submitted filters.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    ctx: PageContext,
    RawQuery(raw_query): RawQuery,
    Query(query): Query<FilterQuery>,
) -> impl IntoResponse {
    let filters = MarketFilters::from_query(query);
    let prices = match state.market().records().await {
        Ok(records) if records.is_empty() => Panel::Empty,
        Ok(records) => Panel::Ready(MarketView::build(&records, filters)),
        Err(err) => Panel::Failed(err),
    };

    let (states, districts, markets) = prices.ready().map_or_else(Default::default, |view| {
        (
            options(&view.states, &view.filters.state),
            options(&view.districts, &view.filters.district),
            options(&view.markets, &view.filters.market),
        )
    });

    let status_code = if prices.error().is_some() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };

    let retry_href = raw_query.map_or_else(
        || "/crop-prices".to_string(),
        |q| format!("/crop-prices?{q}"),
    );

    (
        status_code,
        CropPricesTemplate {
            ctx,
            status: prices.status(),
            prices,
            retry_href,
            states,
            districts,
            markets,
        },
    )
}
