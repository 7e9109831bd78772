//! Session-related types.
//!
//! Types stored in the session besides the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agrow_core::DetectionId;

/// Session keys.
pub mod keys {
    /// Opaque authentication token.
    pub const TOKEN: &str = "token";

    /// Serialized [`User`](crate::models::User).
    pub const USER: &str = "user";

    /// Selected interface language code. Survives logout.
    pub const LANGUAGE: &str = "language";

    /// District chosen during onboarding.
    pub const SELECTED_DISTRICT: &str = "selectedDistrict";

    /// Ordered crop names chosen during onboarding.
    pub const SELECTED_CROPS: &str = "selectedCrops";

    /// Display and notification preferences.
    pub const PREFERENCES: &str = "preferences";

    /// Chat transcript.
    pub const CHAT_TRANSCRIPT: &str = "chat_transcript";

    /// Disease detection history.
    pub const DETECTIONS: &str = "detections";
}

/// Display and notification preferences edited on the settings page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub dark_mode: bool,
    pub notify_weather: bool,
    pub notify_disease: bool,
    pub notify_crop: bool,
    pub notify_price: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: false,
            notify_weather: true,
            notify_disease: true,
            notify_crop: false,
            notify_price: true,
        }
    }
}

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    User,
    Assistant,
}

/// One line of the chat transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: ChatSender,
    pub text: String,
    /// Topic of the rule that produced an assistant reply.
    pub topic: Option<String>,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Maximum number of messages kept in the transcript.
    pub const TRANSCRIPT_LIMIT: usize = 50;

    #[must_use]
    pub fn is_user(&self) -> bool {
        self.sender == ChatSender::User
    }

    /// `HH:MM` in UTC.
    #[must_use]
    pub fn time(&self) -> String {
        self.sent_at.format("%H:%M").to_string()
    }
}

/// A finished disease detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub id: DetectionId,
    pub file_name: String,
    pub disease: String,
    /// Confidence in `0.0..=1.0`.
    pub confidence: f32,
    pub detected_at: DateTime<Utc>,
}

impl DetectionRecord {
    /// Maximum number of detections kept per session.
    pub const HISTORY_LIMIT: usize = 10;

    /// Confidence as a whole percentage.
    #[must_use]
    pub fn confidence_percent(&self) -> u8 {
        crate::diagnosis::percent(self.confidence)
    }

    #[must_use]
    pub fn detected_on(&self) -> String {
        self.detected_at.format("%d %b %Y, %H:%M").to_string()
    }
}
