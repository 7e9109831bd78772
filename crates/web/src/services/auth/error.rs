//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
///
/// The simulated flows accept any validated input, so the only failures come
/// from the session store.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Reading or writing the session failed.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}
