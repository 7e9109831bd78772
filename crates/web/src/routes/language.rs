//! Language switcher.

use axum::{Form, response::Redirect};
use serde::Deserialize;
use tower_sessions::Session;

use agrow_core::Language;

use crate::error::{AppError, Result};
use crate::models::session_keys;

#[derive(Debug, Deserialize)]
pub struct LanguageForm {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub redirect: String,
}

/// `target` if it is a path on this site, otherwise `/`.
///
/// Browsers drop tabs and newlines from URLs, so any control character
/// could turn a local path into a protocol-relative one.
fn local_path(target: &str) -> &str {
    let is_local = target.starts_with('/')
        && !target.starts_with("//")
        && !target.starts_with("/\\")
        && !target.chars().any(char::is_control);
    if is_local { target } else { "/" }
}

/// Store the chosen language and return to the page it was chosen on.
pub async fn switch(session: Session, Form(form): Form<LanguageForm>) -> Result<Redirect> {
    let language = Language::parse(&form.language)
        .ok_or_else(|| AppError::BadRequest(format!("Unsupported language: {}", form.language)))?;

    session.insert(session_keys::LANGUAGE, language).await?;
    tracing::debug!(language = %language, "Language changed");

    Ok(Redirect::to(local_path(&form.redirect)))
}
