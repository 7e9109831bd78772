//! Landing page and the not-found fallback.

use askama::Template;
use askama_web::WebTemplate;
use axum::{http::StatusCode, response::IntoResponse};

use crate::middleware::PageContext;

// =============================================================================
// Feature Grid (static content)
// =============================================================================

/// A landing page feature card, as translation keys.
pub struct Feature {
    pub icon: &'static str,
    pub title_key: &'static str,
    pub desc_key: &'static str,
}

const FEATURES: [Feature; 6] = [
    Feature {
        icon: "☁",
        title_key: "landing.features.weather.title",
        desc_key: "landing.features.weather.desc",
    },
    Feature {
        icon: "🌱",
        title_key: "landing.features.cropRec.title",
        desc_key: "landing.features.cropRec.desc",
    },
    Feature {
        icon: "🍃",
        title_key: "landing.features.diseaseDet.title",
        desc_key: "landing.features.diseaseDet.desc",
    },
    Feature {
        icon: "₹",
        title_key: "landing.features.marketPrices.title",
        desc_key: "landing.features.marketPrices.desc",
    },
    Feature {
        icon: "📱",
        title_key: "landing.features.mobileFriendly.title",
        desc_key: "landing.features.mobileFriendly.desc",
    },
    Feature {
        icon: "अ",
        title_key: "landing.features.localLang.title",
        desc_key: "landing.features.localLang.desc",
    },
];

// =============================================================================
// Templates
// =============================================================================

#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub ctx: PageContext,
    pub features: &'static [Feature],
}

impl HomeTemplate {
    /// Target of the "get started" button.
    fn start_href(&self) -> &'static str {
        if self.ctx.is_authenticated() {
            "/dashboard"
        } else {
            "/auth?mode=register"
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub ctx: PageContext,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the landing page.
pub async fn index(ctx: PageContext) -> impl IntoResponse {
    HomeTemplate {
        ctx,
        features: &FEATURES,
    }
}

/// Fallback for unknown paths.
pub async fn not_found(ctx: PageContext) -> impl IntoResponse {
    tracing::debug!(path = %ctx.path, "No route matched");
    (StatusCode::NOT_FOUND, NotFoundTemplate { ctx })
}
