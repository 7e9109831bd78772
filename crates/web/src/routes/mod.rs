//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                      - Landing page
//! GET  /health                - Health check
//!
//! # Auth
//! GET  /auth                  - Login or registration form (?mode=register)
//! POST /auth/login            - Login action
//! POST /auth/register         - Register action
//! POST /auth/logout           - Logout action
//!
//! # Onboarding (requires auth)
//! GET  /region-selection      - Region step (?state)
//! POST /region-selection      - Store district
//! GET  /crop-selection        - Crop step
//! POST /crop-selection        - Store crops
//!
//! # Advisory
//! GET  /dashboard             - Forecast, prices and advisories (requires auth)
//! GET  /crop-prices           - Mandi price explorer
//! GET  /disease-detection     - Upload form and history
//! POST /disease-detection     - Classify an uploaded image (multipart)
//! GET  /chatbot               - Assistant transcript
//! POST /chatbot               - Send a message
//! POST /chatbot/clear         - Empty the transcript
//!
//! # Preferences
//! GET  /settings              - Settings form (requires auth)
//! POST /settings              - Save settings (requires auth)
//! POST /language              - Switch interface language
//! ```

pub mod auth;
pub mod chatbot;
pub mod crop_prices;
pub mod dashboard;
pub mod disease;
pub mod form;
pub mod home;
pub mod language;
pub mod onboarding;
pub mod options;
pub mod settings;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(auth::page))
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the chatbot routes router.
pub fn chatbot_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(chatbot::page).post(chatbot::send))
        .route("/clear", post(chatbot::clear))
}

/// Create all page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Landing page
        .route("/", get(home::index))
        // Auth routes
        .nest("/auth", auth_routes())
        // Onboarding
        .route(
            "/region-selection",
            get(onboarding::region_page).post(onboarding::select_region),
        )
        .route(
            "/crop-selection",
            get(onboarding::crops_page).post(onboarding::select_crops),
        )
        // Advisory pages
        .route("/dashboard", get(dashboard::index))
        .route("/crop-prices", get(crop_prices::index))
        .route(
            "/disease-detection",
            get(disease::page).post(disease::detect),
        )
        .nest("/chatbot", chatbot_routes())
        // Preferences
        .route("/settings", get(settings::page).post(settings::save))
        .route("/language", post(language::switch))
        .fallback(home::not_found)
}
