//! Per-request page context.
//!
//! Every page template receives a [`PageContext`] carrying the signed-in
//! user, the interface language and the display preferences read from the
//! session.

use axum::{
    extract::{FromRequestParts, OriginalUri},
    http::request::Parts,
};
use chrono::{Datelike, Utc};
use tower_sessions::Session;

use agrow_core::Language;

use crate::i18n;
use crate::models::{AuthSession, Preferences, session_keys};
use crate::services::AuthStore;

/// Session-derived data shared by every page.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub auth: Option<AuthSession>,
    pub language: Language,
    pub preferences: Preferences,
    /// Request path, used for the active navigation link.
    pub path: String,
    /// Path and query, where the language switcher returns to.
    pub return_to: String,
}

/// One entry of the language switcher.
#[derive(Debug, Clone, Copy)]
pub struct LanguageOption {
    pub code: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

impl PageContext {
    /// Translate `key` into the current language.
    #[must_use]
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        i18n::translate(self.language, key)
    }

    /// Translate `key`, replacing the `{name}` placeholder with `value`.
    #[must_use]
    pub fn tw(&self, key: &str, name: &str, value: &str) -> String {
        i18n::translate_with(self.language, key, &[(name, value)])
    }

    #[must_use]
    pub fn copyright(&self) -> String {
        self.tw(
            "landing.footer.copyright",
            "year",
            &Utc::now().year().to_string(),
        )
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    /// Display name of the signed-in user, empty for visitors.
    #[must_use]
    pub fn username(&self) -> &str {
        self.auth.as_ref().map_or("", |a| a.user.username.as_str())
    }

    #[must_use]
    pub fn is_current(&self, path: &str) -> bool {
        self.path == path
    }

    #[must_use]
    pub const fn lang_code(&self) -> &'static str {
        self.language.code()
    }

    #[must_use]
    pub const fn theme(&self) -> &'static str {
        if self.preferences.dark_mode {
            "dark"
        } else {
            "light"
        }
    }

    #[must_use]
    pub fn languages(&self) -> Vec<LanguageOption> {
        Language::ALL
            .iter()
            .map(|&lang| LanguageOption {
                code: lang.code(),
                label: lang.label(),
                selected: lang == self.language,
            })
            .collect()
    }
}

impl<S> FromRequestParts<S> for PageContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Nested routers see the URI with their prefix stripped.
        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map_or(&parts.uri, |original| &original.0);
        let path = uri.path().to_string();
        let return_to = uri
            .path_and_query()
            .map_or_else(|| path.clone(), ToString::to_string);

        let Some(session) = parts.extensions.get::<Session>() else {
            return Ok(Self {
                path,
                return_to,
                ..Self::default()
            });
        };

        Ok(Self {
            auth: AuthStore::new(session).current().await.ok().flatten(),
            language: read_language(session).await,
            preferences: read_preferences(session).await,
            path,
            return_to,
        })
    }
}

/// The stored language, English when unset or unreadable.
pub async fn read_language(session: &Session) -> Language {
    session
        .get::<Language>(session_keys::LANGUAGE)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// The stored preferences, defaults when unset or unreadable.
pub async fn read_preferences(session: &Session) -> Preferences {
    session
        .get::<Preferences>(session_keys::PREFERENCES)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}
