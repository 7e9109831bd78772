//! Account settings: language, appearance, notifications and farm details.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use agrow_core::{Language, REGIONS};

use crate::error::Result;
use crate::middleware::{PageContext, RequireAuth};
use crate::models::{Preferences, User, session_keys};
use crate::routes::form::MultiForm;
use crate::routes::options::{CheckOption, SelectOption, crop_options};
use crate::services::onboarding::OnboardingSession;

const SAVED_PATH: &str = "/settings?saved=1";

// =============================================================================
// Query Types
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct SettingsQuery {
    pub saved: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

#[derive(Template, WebTemplate)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub ctx: PageContext,
    pub preferences: Preferences,
    pub districts: Vec<SelectOption>,
    pub crops: Vec<CheckOption>,
    pub saved: bool,
    pub error: Option<&'static str>,
}

/// Districts offered for `user`: those of their state, or every catalog
/// district when the state is unknown. The current district is always kept.
fn district_options(user: &User, current: &str) -> Vec<SelectOption> {
    let mut districts: Vec<&str> = match user.state.as_deref().map(agrow_core::districts_of) {
        Some(list) if !list.is_empty() => list.to_vec(),
        _ => REGIONS.iter().flat_map(|r| r.districts.iter().copied()).collect(),
    };
    if !current.is_empty() && !districts.contains(&current) {
        districts.insert(0, current);
    }
    SelectOption::list(districts, current)
}

/// The submitted preferences. Unticked checkboxes are absent from the form.
fn preferences_from(form: &MultiForm) -> Preferences {
    Preferences {
        dark_mode: form.checked("dark_mode"),
        notify_weather: form.checked("notify_weather"),
        notify_disease: form.checked("notify_disease"),
        notify_crop: form.checked("notify_crop"),
        notify_price: form.checked("notify_price"),
    }
}

/// Translation key of the first problem with the farm details, if any.
fn farm_error(district: &str, crops: &[String]) -> Option<&'static str> {
    if district.trim().is_empty() {
        Some("region.error.districtRequired")
    } else if crops.iter().all(|c| c.trim().is_empty()) {
        Some("crops.error.required")
    } else {
        None
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the settings form.
pub async fn page(
    RequireAuth(auth): RequireAuth,
    ctx: PageContext,
    session: Session,
    Query(query): Query<SettingsQuery>,
) -> Result<impl IntoResponse> {
    let selection = OnboardingSession::new(&session).selection().await?;

    Ok(SettingsTemplate {
        preferences: ctx.preferences.clone(),
        districts: district_options(&auth.user, &selection.district),
        crops: crop_options(&selection.crops),
        saved: query.saved.is_some(),
        error: None,
        ctx,
    })
}

/// Save every section of the form at once.
///
/// Nothing is written when the farm details are incomplete.
#[instrument(skip_all, fields(user_id = %auth.user.id))]
pub async fn save(
    RequireAuth(auth): RequireAuth,
    ctx: PageContext,
    session: Session,
    form: MultiForm,
) -> Result<Response> {
    let preferences = preferences_from(&form);
    let district = form.get("district");
    let crops = form.all("crops");

    if let Some(error) = farm_error(district, &crops) {
        let template = SettingsTemplate {
            preferences,
            districts: district_options(&auth.user, district.trim()),
            crops: crop_options(&crops),
            saved: false,
            error: Some(error),
            ctx,
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
    }

    let onboarding = OnboardingSession::new(&session);
    onboarding.select_district(district).await?;
    onboarding.select_crops(&crops).await?;

    let language = Language::parse(form.get("language")).unwrap_or(ctx.language);
    session.insert(session_keys::LANGUAGE, language).await?;
    session
        .insert(session_keys::PREFERENCES, &preferences)
        .await?;

    tracing::info!(language = %language, dark_mode = preferences.dark_mode, "Settings saved");
    Ok(Redirect::to(SAVED_PATH).into_response())
}
