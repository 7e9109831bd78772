//! Authentication service.
//!
//! Login and registration are simulated: any validated input succeeds and
//! produces a fresh user with a random opaque token. The session is the only
//! record of who is signed in.

mod error;
pub mod validation;

pub use error::AuthError;
pub use validation::{
    FieldErrors, LoginCredentials, RegistrationInput, RegistrationProfile, validate_login,
    validate_registration,
};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;
use tower_sessions::Session;
use tracing::instrument;

use agrow_core::UserId;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::models::{AuthSession, User, session_keys};

/// Number of random bytes in a generated token.
const TOKEN_BYTES: usize = 24;

/// Keys removed on logout. The language choice outlives the login.
const LOGOUT_KEYS: &[&str] = &[
    session_keys::TOKEN,
    session_keys::USER,
    session_keys::SELECTED_DISTRICT,
    session_keys::SELECTED_CROPS,
    session_keys::CHAT_TRANSCRIPT,
    session_keys::DETECTIONS,
];

/// Session-backed authentication store.
pub struct AuthStore<'a> {
    session: &'a Session,
}

impl<'a> AuthStore<'a> {
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Sign in with validated credentials.
    ///
    /// Always succeeds unless the session store fails, replacing any
    /// previous session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Session` if the session cannot be written.
    #[instrument(skip_all, fields(username = %credentials.username))]
    pub async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, AuthError> {
        let user = User {
            id: UserId::new_v4(),
            username: credentials.username,
            email: None,
            is_active: true,
            state: None,
            city: None,
            phone: None,
            crop_preferences: Vec::new(),
        };

        self.establish(user).await
    }

    /// Register a new user from a validated profile and sign them in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Session` if the session cannot be written.
    #[instrument(skip_all, fields(username = %profile.username))]
    pub async fn register(&self, profile: RegistrationProfile) -> Result<AuthSession, AuthError> {
        let user = User {
            id: UserId::new_v4(),
            username: profile.username,
            email: Some(profile.email),
            is_active: true,
            state: Some(profile.state),
            city: Some(profile.city),
            phone: Some(profile.phone),
            crop_preferences: profile.crop_preferences,
        };

        self.establish(user).await
    }

    /// Remove the user, token and per-login data from the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Session` if the session cannot be modified.
    pub async fn logout(&self) -> Result<(), AuthError> {
        for key in LOGOUT_KEYS {
            self.session.remove_value(key).await?;
        }
        clear_sentry_user();
        tracing::info!("User logged out");
        Ok(())
    }

    /// The signed-in user and token, if both are present.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Session` if the session cannot be read.
    pub async fn current(&self) -> Result<Option<AuthSession>, AuthError> {
        let token: Option<String> = self.session.get(session_keys::TOKEN).await?;
        let user: Option<User> = self.session.get(session_keys::USER).await?;

        Ok(token
            .zip(user)
            .map(|(token, user)| AuthSession { user, token }))
    }

    /// Whether both the token and the user are present.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Session` if the session cannot be read.
    pub async fn is_authenticated(&self) -> Result<bool, AuthError> {
        Ok(self.current().await?.is_some())
    }

    async fn establish(&self, user: User) -> Result<AuthSession, AuthError> {
        let token = generate_token();

        self.session.cycle_id().await?;
        self.session.insert(session_keys::USER, &user).await?;
        self.session.insert(session_keys::TOKEN, &token).await?;

        set_sentry_user(&user.id, user.email.as_ref().map(agrow_core::Email::as_str));
        tracing::info!(user_id = %user.id, "User signed in");

        Ok(AuthSession { user, token })
    }
}

/// A fresh opaque token: `mock-` followed by URL-safe base64 of random bytes.
fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill(&mut bytes);
    format!("mock-{}", URL_SAFE_NO_PAD.encode(bytes))
}
