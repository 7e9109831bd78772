//! Interface languages.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A supported interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English, the fallback for missing translations.
    #[default]
    En,
    /// Marathi.
    Mr,
    /// Hindi.
    Hi,
}

impl Language {
    /// All languages in menu order.
    pub const ALL: [Self; 3] = [Self::En, Self::Mr, Self::Hi];

    /// ISO 639-1 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Mr => "mr",
            Self::Hi => "hi",
        }
    }

    /// Name of the language in its own script.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Mr => "मराठी",
            Self::Hi => "हिंदी",
        }
    }

    /// Parse a language code, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "mr" => Some(Self::Mr),
            "hi" => Some(Self::Hi),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
