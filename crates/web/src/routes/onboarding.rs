//! First-run onboarding: region selection, then crop selection.
//!
//! Each step re-renders with the previous selection ticked. A step only
//! advances once its selection is non-empty.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use agrow_core::REGIONS;

use crate::error::{Result, add_breadcrumb};
use crate::middleware::{PageContext, RequireAuth};
use crate::routes::form::MultiForm;
use crate::routes::options::{CheckOption, SelectOption, crop_options, state_options};
use crate::services::OnboardingStep;
use crate::services::onboarding::{OnboardingError, OnboardingSession, ProgressStep};

// =============================================================================
// Form Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct RegionForm {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub district: String,
}

// =============================================================================
// Query Types
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct RegionQuery {
    pub state: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

#[derive(Template, WebTemplate)]
#[template(path = "region_selection.html")]
pub struct RegionTemplate {
    pub ctx: PageContext,
    pub progress: Vec<ProgressStep>,
    pub state: String,
    pub states: Vec<SelectOption>,
    pub districts: Vec<SelectOption>,
    pub error: Option<&'static str>,
}

impl RegionTemplate {
    fn new(ctx: PageContext, state: &str, district: &str) -> Self {
        Self {
            ctx,
            progress: OnboardingStep::SelectRegion.progress(),
            state: state.to_string(),
            states: state_options(state),
            districts: SelectOption::list(
                agrow_core::districts_of(state).iter().copied(),
                district,
            ),
            error: None,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "crop_selection.html")]
pub struct CropTemplate {
    pub ctx: PageContext,
    pub progress: Vec<ProgressStep>,
    pub district: String,
    pub crops: Vec<CheckOption>,
    pub error: Option<&'static str>,
}

/// State whose district list contains `district`.
fn state_of(district: &str) -> Option<&'static str> {
    REGIONS
        .iter()
        .find(|r| r.districts.contains(&district))
        .map(|r| r.state)
}

// =============================================================================
// Region Selection
// =============================================================================

/// Display the region step.
///
/// The state comes from the query (the "show districts" button), else from
/// the stored district, else from the user's registration state.
pub async fn region_page(
    RequireAuth(auth): RequireAuth,
    ctx: PageContext,
    session: Session,
    Query(query): Query<RegionQuery>,
) -> Result<impl IntoResponse> {
    let selection = OnboardingSession::new(&session).selection().await?;

    let state = query
        .state
        .filter(|s| !s.is_empty())
        .or_else(|| state_of(&selection.district).map(String::from))
        .or(auth.user.state)
        .unwrap_or_default();

    Ok(RegionTemplate::new(ctx, &state, &selection.district))
}

/// Store the district and continue to crop selection.
#[instrument(skip_all, fields(district = %form.district))]
pub async fn select_region(
    RequireAuth(_): RequireAuth,
    ctx: PageContext,
    session: Session,
    Form(form): Form<RegionForm>,
) -> Result<Response> {
    match OnboardingSession::new(&session)
        .select_district(&form.district)
        .await
    {
        Ok(()) => {
            add_breadcrumb(
                "onboarding",
                "District selected",
                Some(&[("district", form.district.as_str())]),
            );
            Ok(Redirect::to(OnboardingStep::SelectCrops.path()).into_response())
        }
        Err(OnboardingError::MissingDistrict) => {
            let mut template = RegionTemplate::new(ctx, &form.state, "");
            template.error = Some("region.error.districtRequired");
            Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

// =============================================================================
// Crop Selection
// =============================================================================

/// Display the crop step.
///
/// Ticks the stored crops, or the registration preferences on first visit.
pub async fn crops_page(
    RequireAuth(auth): RequireAuth,
    ctx: PageContext,
    session: Session,
) -> Result<impl IntoResponse> {
    let selection = OnboardingSession::new(&session).selection().await?;
    let selected = if selection.crops.is_empty() {
        auth.user.crop_preferences
    } else {
        selection.crops
    };

    Ok(CropTemplate {
        ctx,
        progress: OnboardingStep::SelectCrops.progress(),
        district: selection.district,
        crops: crop_options(&selected),
        error: None,
    })
}

/// Store the crops and continue to the dashboard.
#[instrument(skip_all)]
pub async fn select_crops(
    RequireAuth(_): RequireAuth,
    ctx: PageContext,
    session: Session,
    form: MultiForm,
) -> Result<Response> {
    let onboarding = OnboardingSession::new(&session);

    match onboarding.select_crops(form.all("crops")).await {
        Ok(crops) => {
            add_breadcrumb(
                "onboarding",
                "Crops selected",
                Some(&[("count", crops.len().to_string().as_str())]),
            );
            Ok(Redirect::to(OnboardingStep::Dashboard.path()).into_response())
        }
        Err(OnboardingError::MissingCrops) => {
            let selection = onboarding.selection().await?;
            let template = CropTemplate {
                ctx,
                progress: OnboardingStep::SelectCrops.progress(),
                district: selection.district,
                crops: crop_options(&[]),
                error: Some("crops.error.required"),
            };
            Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_of_district() {
        assert_eq!(state_of("Nashik"), Some("Maharashtra"));
        assert_eq!(state_of("Atlantis"), None);
        assert_eq!(state_of(""), None);
    }

    #[test]
    fn test_region_template_lists_state_districts() {
        let template = RegionTemplate::new(PageContext::default(), "Maharashtra", "Pune");
        assert!(template.districts.iter().any(|d| d.value == "Pune" && d.selected));
        assert!(template.states.iter().any(|s| s.value == "Maharashtra" && s.selected));

        let empty = RegionTemplate::new(PageContext::default(), "", "");
        assert!(empty.districts.is_empty());
    }
}
