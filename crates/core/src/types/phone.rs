//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains a character other than digits, spaces, `-`, `(`, `)`
    /// or a leading `+`.
    #[error("phone number contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A loosely formatted phone number.
///
/// Accepts an optional leading `+` followed by digits, spaces, hyphens and
/// parentheses. No length or country checks are made.
///
/// ```
/// use agrow_core::PhoneNumber;
///
/// assert!(PhoneNumber::parse("+91 98765-43210").is_ok());
/// assert!(PhoneNumber::parse("(020) 2553 1234").is_ok());
/// assert!(PhoneNumber::parse("98765x43210").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse a `PhoneNumber` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or contains a disallowed
    /// character.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let body = s.strip_prefix('+').unwrap_or(s);
        if body.is_empty() {
            return Err(PhoneError::Empty);
        }

        if let Some(bad) = body
            .chars()
            .find(|c| !(c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')')))
        {
            return Err(PhoneError::InvalidCharacter(bad));
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
