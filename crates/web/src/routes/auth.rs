//! Login, registration and logout.
//!
//! Both forms live on `/auth`, switched by `?mode=`. Validation failures
//! re-render the form with per-field messages and status 422.

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

use crate::error::{Result, add_breadcrumb};
use crate::i18n;
use crate::middleware::PageContext;
use crate::routes::form::MultiForm;
use crate::routes::options::{CheckOption, SelectOption, crop_options, state_options};
use crate::services::auth::{
    FieldErrors, RegistrationInput, validate_login, validate_registration,
};
use crate::services::onboarding::ProgressStep;
use crate::services::{AuthStore, OnboardingStep};

/// Where a successful login or registration continues.
const AFTER_AUTH_PATH: &str = "/region-selection";

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

// =============================================================================
// Query Types
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct AuthQuery {
    pub mode: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login / registration page.
#[derive(Template, WebTemplate)]
#[template(path = "auth.html")]
pub struct AuthTemplate {
    pub ctx: PageContext,
    pub register: bool,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub state: String,
    pub city: String,
    pub errors: FieldErrors,
    pub states: Vec<SelectOption>,
    pub cities: Vec<SelectOption>,
    pub crops: Vec<CheckOption>,
    pub progress: Vec<ProgressStep>,
}

impl AuthTemplate {
    fn new(ctx: PageContext, register: bool) -> Self {
        Self {
            ctx,
            register,
            username: String::new(),
            email: String::new(),
            phone: String::new(),
            state: String::new(),
            city: String::new(),
            errors: FieldErrors::default(),
            states: state_options(""),
            cities: Vec::new(),
            crops: crop_options(&[]),
            progress: OnboardingStep::Register.progress(),
        }
    }

    /// Re-populate the registration form from a submission.
    fn with_registration(mut self, form: &MultiForm) -> Self {
        self.username = form.get("username").to_string();
        self.email = form.get("email").to_string();
        self.phone = form.get("phone").to_string();
        self.state = form.get("state").to_string();
        self.city = form.get("city").to_string();
        self.states = state_options(&self.state);
        self.cities = SelectOption::list(
            agrow_core::cities_of(&self.state).iter().copied(),
            &self.city,
        );
        self.crops = crop_options(&form.all("crop_preferences"));
        self
    }

    /// Translated error message for `field`, empty when the field is valid.
    fn field_error(&self, field: &str) -> &'static str {
        self.errors
            .get(field)
            .map_or("", |key| i18n::translate(self.ctx.language, key))
    }
}

fn invalid(template: AuthTemplate) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, template).into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login or registration form.
pub async fn page(ctx: PageContext, Query(query): Query<AuthQuery>) -> impl IntoResponse {
    let register = query.mode.as_deref() == Some("register");
    AuthTemplate::new(ctx, register)
}

/// Handle login form submission.
#[instrument(skip_all)]
pub async fn login(
    ctx: PageContext,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let credentials = match validate_login(&form.username, &form.password) {
        Ok(credentials) => credentials,
        Err(errors) => {
            let mut template = AuthTemplate::new(ctx, false);
            template.username = form.username;
            template.errors = errors;
            return Ok(invalid(template));
        }
    };

    AuthStore::new(&session).login(credentials).await?;
    add_breadcrumb("auth", "Logged in", None);

    Ok(Redirect::to(AFTER_AUTH_PATH).into_response())
}

/// Handle registration form submission.
///
/// The "load cities" button posts the same form with `action=load_cities`;
/// that re-renders the form with the chosen state's cities and skips
/// validation.
#[instrument(skip_all)]
pub async fn register(ctx: PageContext, session: Session, form: MultiForm) -> Result<Response> {
    if form.get("action") == "load_cities" {
        return Ok(AuthTemplate::new(ctx, true)
            .with_registration(&form)
            .into_response());
    }

    let input = RegistrationInput {
        username: form.get("username"),
        email: form.get("email"),
        password: form.get("password"),
        confirm_password: form.get("confirm_password"),
        phone: form.get("phone"),
        state: form.get("state"),
        city: form.get("city"),
        crop_preferences: form.all("crop_preferences"),
    };

    let profile = match validate_registration(input) {
        Ok(profile) => profile,
        Err(errors) => {
            let mut template = AuthTemplate::new(ctx, true).with_registration(&form);
            template.errors = errors;
            return Ok(invalid(template));
        }
    };

    AuthStore::new(&session).register(profile).await?;
    add_breadcrumb("auth", "Registered", None);

    Ok(Redirect::to(AFTER_AUTH_PATH).into_response())
}

/// Sign out and return to the landing page.
pub async fn logout(session: Session) -> Result<Redirect> {
    AuthStore::new(&session).logout().await?;
    Ok(Redirect::to("/"))
}
