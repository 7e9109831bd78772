//! Route guard extractors.
//!
//! A handler taking [`RequireAuth`] only runs for an authenticated session;
//! anyone else is sent to the login form.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::AuthSession;
use crate::services::AuthStore;

/// Where anonymous visitors of guarded pages are sent.
pub const LOGIN_PATH: &str = "/auth?mode=login";

/// Extractor that requires an authenticated session.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(RequireAuth(auth): RequireAuth) -> impl IntoResponse {
///     format!("Welcome, {}!", auth.user.username)
/// }
/// ```
pub struct RequireAuth(pub AuthSession);

/// Error returned when authentication is required but the user is not logged in.
#[derive(Debug)]
pub enum AuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        let auth = AuthStore::new(session)
            .current()
            .await
            .inspect_err(|e| {
                tracing::warn!(error = %e, "Failed to read session, treating as anonymous");
            })
            .ok()
            .flatten()
            .ok_or_else(|| {
                if parts.uri.path().starts_with("/api/") {
                    AuthRejection::Unauthorized
                } else {
                    tracing::debug!(path = %parts.uri.path(), "Anonymous request to guarded page");
                    AuthRejection::RedirectToLogin
                }
            })?;

        Ok(Self(auth))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::http::Request;
    use tower_sessions::session::{Id, Record};
    use tower_sessions::{SessionStore, session_store};

    use super::*;

    /// Store whose backend is always down.
    #[derive(Debug, Clone)]
    struct UnavailableStore;

    #[async_trait]
    impl SessionStore for UnavailableStore {
        async fn save(&self, _record: &Record) -> session_store::Result<()> {
            Err(session_store::Error::Backend("store unavailable".to_string()))
        }

        async fn load(&self, _session_id: &Id) -> session_store::Result<Option<Record>> {
            Err(session_store::Error::Backend("store unavailable".to_string()))
        }

        async fn delete(&self, _session_id: &Id) -> session_store::Result<()> {
            Err(session_store::Error::Backend("store unavailable".to_string()))
        }
    }

    fn parts_with_session(path: &str, session: Session) -> Parts {
        let (mut parts, ()) = Request::builder()
            .uri(path)
            .body(())
            .unwrap()
            .into_parts();
        parts.extensions.insert(session);
        parts
    }

    #[tokio::test]
    async fn test_store_failure_redirects_to_login() {
        let session = Session::new(Some(Id::default()), Arc::new(UnavailableStore), None);
        let mut parts = parts_with_session("/dashboard", session);

        let rejection = RequireAuth::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();
        assert!(matches!(rejection, AuthRejection::RedirectToLogin));
    }

    #[tokio::test]
    async fn test_store_failure_under_api_is_unauthorized() {
        let session = Session::new(Some(Id::default()), Arc::new(UnavailableStore), None);
        let mut parts = parts_with_session("/api/profile", session);

        let rejection = RequireAuth::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();
        assert!(matches!(rejection, AuthRejection::Unauthorized));
    }

    #[tokio::test]
    async fn test_missing_session_layer_is_unauthorized() {
        let (mut parts, ()) = Request::builder()
            .uri("/dashboard")
            .body(())
            .unwrap()
            .into_parts();

        let rejection = RequireAuth::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();
        assert!(matches!(rejection, AuthRejection::Unauthorized));
    }
}
