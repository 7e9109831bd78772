//! Domain models for the web application.
//!
//! Everything here is stored in the session as JSON.

pub mod session;
pub mod user;

pub use session::{ChatMessage, ChatSender, DetectionRecord, Preferences, keys as session_keys};
pub use user::{AuthSession, User};
