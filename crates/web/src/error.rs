//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. Route handlers return `Result<T>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::diagnosis::DiagnosisError;
use crate::services::auth::AuthError;
use crate::services::onboarding::OnboardingError;
use crate::services::FetchError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Onboarding step rejected or failed.
    #[error("Onboarding error: {0}")]
    Onboarding(#[from] OnboardingError),

    /// Upload rejected or classification failed.
    #[error("Diagnosis error: {0}")]
    Diagnosis(#[from] DiagnosisError),

    /// Third-party data fetch failed.
    #[error("Upstream error: {0}")]
    Fetch(#[from] FetchError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Session(_) | Self::Auth(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Onboarding(err) => match err {
                OnboardingError::MissingDistrict | OnboardingError::MissingCrops => {
                    StatusCode::BAD_REQUEST
                }
                OnboardingError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Diagnosis(err) => match err {
                DiagnosisError::Empty | DiagnosisError::NotImage(_) => StatusCode::BAD_REQUEST,
                DiagnosisError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                DiagnosisError::Classifier(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Fetch(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Session(_) | Self::Auth(_) | Self::Internal(_) => {
                "Internal server error".to_string()
            }
            Self::Onboarding(OnboardingError::Session(_))
            | Self::Diagnosis(DiagnosisError::Classifier(_)) => "Internal server error".to_string(),
            Self::Fetch(_) => "External service error".to_string(),
            Self::Onboarding(err) => err.to_string(),
            Self::Diagnosis(err) => err.to_string(),
            Self::NotFound(_) | Self::BadRequest(_) => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// ```rust,ignore
/// add_breadcrumb("onboarding", "District selected", Some(&[("district", "Pune")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("/nowhere".to_string());
        assert_eq!(err.to_string(), "Not found: /nowhere");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Fetch(FetchError::MissingRecords)),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_client_errors_from_domain() {
        assert_eq!(
            get_status(DiagnosisError::Empty.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(OnboardingError::MissingCrops.into()),
            StatusCode::BAD_REQUEST
        );
    }
}
