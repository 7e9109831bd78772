//! Form validation for the login and registration forms.
//!
//! Validation runs before the [`AuthStore`](super::AuthStore) is called. Each
//! failing field maps to a translation key rendered next to the input.

use agrow_core::{Email, PhoneNumber};

/// Minimum password length for registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Per-field validation failures, in form order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors(Vec<(&'static str, &'static str)>);

impl FieldErrors {
    fn add(&mut self, field: &'static str, message_key: &'static str) {
        self.0.push((field, message_key));
    }

    /// Translation key of the error for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, key)| *key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.0.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

/// Validated login input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

/// Validated registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationProfile {
    pub username: String,
    pub email: Email,
    pub phone: PhoneNumber,
    pub state: String,
    pub city: String,
    pub crop_preferences: Vec<String>,
}

/// Raw registration fields as submitted.
#[derive(Debug, Default, Clone)]
pub struct RegistrationInput<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
    pub phone: &'a str,
    pub state: &'a str,
    pub city: &'a str,
    pub crop_preferences: Vec<String>,
}

/// Check that both login fields are present after trimming.
///
/// # Errors
///
/// Returns the failing fields.
pub fn validate_login(username: &str, password: &str) -> Result<LoginCredentials, FieldErrors> {
    let mut errors = FieldErrors::default();
    let username = username.trim();
    let password = password.trim();

    if username.is_empty() {
        errors.add("username", "auth.error.usernameRequired");
    }
    if password.is_empty() {
        errors.add("password", "auth.error.passwordRequired");
    }

    errors.into_result(|| LoginCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Check every registration field.
///
/// # Errors
///
/// Returns the failing fields.
pub fn validate_registration(
    input: RegistrationInput<'_>,
) -> Result<RegistrationProfile, FieldErrors> {
    let mut errors = FieldErrors::default();

    let username = input.username.trim();
    if username.is_empty() {
        errors.add("username", "auth.error.usernameRequired");
    }

    let email = input.email.trim();
    let email = if email.is_empty() {
        errors.add("email", "auth.error.emailRequired");
        None
    } else {
        Email::parse(email)
            .inspect_err(|_| errors.add("email", "auth.error.emailInvalid"))
            .ok()
    };

    if input.password.trim().is_empty() {
        errors.add("password", "auth.error.passwordRequired");
    } else if input.password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.add("password", "auth.error.passwordTooShort");
    }

    if input.confirm_password.trim().is_empty() {
        errors.add("confirm_password", "auth.error.confirmRequired");
    } else if input.password != input.confirm_password {
        errors.add("confirm_password", "auth.error.passwordMismatch");
    }

    let phone = input.phone.trim();
    let phone = if phone.is_empty() {
        errors.add("phone", "auth.error.phoneRequired");
        None
    } else {
        PhoneNumber::parse(phone)
            .inspect_err(|_| errors.add("phone", "auth.error.phoneInvalid"))
            .ok()
    };

    let state = input.state.trim();
    if state.is_empty() {
        errors.add("state", "auth.error.stateRequired");
    }
    let city = input.city.trim();
    if city.is_empty() {
        errors.add("city", "auth.error.cityRequired");
    }

    match (email, phone) {
        (Some(email), Some(phone)) if errors.is_empty() => Ok(RegistrationProfile {
            username: username.to_string(),
            email,
            phone,
            state: state.to_string(),
            city: city.to_string(),
            crop_preferences: input.crop_preferences,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_input() -> RegistrationInput<'static> {
        RegistrationInput {
            username: "ravi",
            email: "ravi@example.com",
            password: "kharif24",
            confirm_password: "kharif24",
            phone: "+91 98765 43210",
            state: "Maharashtra",
            city: "Pune",
            crop_preferences: vec!["Soybean".to_string()],
        }
    }

    #[test]
    fn test_login_trims_fields() {
        let creds = validate_login("  ravi ", " secret ").unwrap();
        assert_eq!(creds.username, "ravi");
        assert_eq!(creds.password, "secret");
    }

    #[test]
    fn test_login_requires_both_fields() {
        let errors = validate_login("   ", "").unwrap_err();
        assert_eq!(errors.get("username"), Some("auth.error.usernameRequired"));
        assert_eq!(errors.get("password"), Some("auth.error.passwordRequired"));
    }

    #[test]
    fn test_registration_valid() {
        let profile = validate_registration(valid_input()).unwrap();
        assert_eq!(profile.username, "ravi");
        assert_eq!(profile.email.as_str(), "ravi@example.com");
        assert_eq!(profile.city, "Pune");
    }

    #[test]
    fn test_registration_rejects_bad_email_and_phone() {
        let input = RegistrationInput {
            email: "ravi@localhost",
            phone: "98765-abc",
            ..valid_input()
        };
        let errors = validate_registration(input).unwrap_err();
        assert_eq!(errors.get("email"), Some("auth.error.emailInvalid"));
        assert_eq!(errors.get("phone"), Some("auth.error.phoneInvalid"));
        assert_eq!(errors.get("username"), None);
    }

    #[test]
    fn test_registration_password_rules() {
        let short = RegistrationInput {
            password: "abc",
            confirm_password: "abc",
            ..valid_input()
        };
        let errors = validate_registration(short).unwrap_err();
        assert_eq!(errors.get("password"), Some("auth.error.passwordTooShort"));

        let mismatch = RegistrationInput {
            confirm_password: "kharif25",
            ..valid_input()
        };
        let errors = validate_registration(mismatch).unwrap_err();
        assert_eq!(
            errors.get("confirm_password"),
            Some("auth.error.passwordMismatch")
        );
    }

    #[test]
    fn test_registration_requires_location() {
        let input = RegistrationInput {
            state: "",
            city: " ",
            ..valid_input()
        };
        let errors = validate_registration(input).unwrap_err();
        assert_eq!(errors.get("state"), Some("auth.error.stateRequired"));
        assert_eq!(errors.get("city"), Some("auth.error.cityRequired"));
    }
}
