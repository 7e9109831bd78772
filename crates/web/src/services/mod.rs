//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Simulated login, registration and logout
//! - `onboarding` - Region and crop selection flow
//! - `panel` - Shared adapter error and panel presentation types

pub mod auth;
pub mod onboarding;
pub mod panel;

pub use auth::{AuthError, AuthStore};
pub use onboarding::{OnboardingSession, OnboardingStep};
pub use panel::{FetchError, Panel, PanelStatus};
