//! Submit-time form checks for credentials and trips.
//!
//! These run before any request is built. A failure short-circuits the flow
//! with the generic "Invalid Entry" message and never touches the network.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

/// Message shown for any client-side validation failure.
pub const INVALID_ENTRY: &str = "Invalid Entry";

const PASSWORD_MIN_LEN: usize = 8;
const PASSWORD_MAX_LEN: usize = 24;
const PASSWORD_SPECIALS: &[char] = &['!', '@', '#', '$', '%'];

/// Validated login input: trimmed identifier plus the untouched secret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginInput<'a> {
    pub identifier: &'a str,
    pub secret: &'a str,
}

/// Validated registration input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationInput<'a> {
    pub phone: &'a str,
    pub email: &'a str,
    pub secret: &'a str,
}

/// Require a non-blank identifier and a non-empty secret.
///
/// # Errors
///
/// Returns [`INVALID_ENTRY`] when either field is missing.
pub fn validate_login<'a>(identifier: &'a str, secret: &'a str) -> Result<LoginInput<'a>, &'static str> {
    let identifier = identifier.trim();
    if identifier.is_empty() || secret.is_empty() {
        return Err(INVALID_ENTRY);
    }
    Ok(LoginInput { identifier, secret })
}

/// Require a phone, a plausible email, and a strong password.
///
/// # Errors
///
/// Returns [`INVALID_ENTRY`] when any field fails its check.
pub fn validate_registration<'a>(
    phone: &'a str,
    email: &'a str,
    secret: &'a str,
) -> Result<RegistrationInput<'a>, &'static str> {
    let phone = phone.trim();
    let email = email.trim();
    if phone.is_empty() || !is_valid_email(email) || !is_strong_password(secret) {
        return Err(INVALID_ENTRY);
    }
    Ok(RegistrationInput { phone, email, secret })
}

/// Validated trip input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TripInput<'a> {
    pub location_name: &'a str,
    pub date: &'a str,
    pub days: u32,
}

/// Require a place, a date, and a positive whole number of days.
///
/// # Errors
///
/// Returns [`INVALID_ENTRY`] when a field is blank or `days` is not a
/// positive integer.
pub fn validate_trip<'a>(location_name: &'a str, date: &'a str, days: &str) -> Result<TripInput<'a>, &'static str> {
    let location_name = location_name.trim();
    let date = date.trim();
    let days = days.trim().parse::<u32>().map_err(|_| INVALID_ENTRY)?;
    if location_name.is_empty() || date.is_empty() || days == 0 {
        return Err(INVALID_ENTRY);
    }
    Ok(TripInput { location_name, date, days })
}

/// `local@domain.tld` with no whitespace and non-empty parts.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !local.is_empty() && !host.is_empty() && !tld.is_empty()
}

/// 8-24 chars with a lowercase letter, an uppercase letter, a digit, and one of `!@#$%`.
#[must_use]
pub fn is_strong_password(secret: &str) -> bool {
    let len = secret.chars().count();
    (PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len)
        && secret.chars().any(|c| c.is_ascii_lowercase())
        && secret.chars().any(|c| c.is_ascii_uppercase())
        && secret.chars().any(|c| c.is_ascii_digit())
        && secret.chars().any(|c| PASSWORD_SPECIALS.contains(&c))
}

/// Password confirmation field must match exactly.
#[must_use]
pub fn passwords_match(secret: &str, confirmation: &str) -> bool {
    !secret.is_empty() && secret == confirmation
}
