//! Field validation rules shared by the profile and registration forms.
//!
//! Every rule is a pure function returning `Ok(())` or the reason the value
//! was rejected.

use thiserror::Error;
use url::Url;

pub const MIN_PASSWORD_LEN: usize = 8;
const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("not a valid web address: {reason}")]
    InvalidUrl { reason: String },
    #[error("web address must start with http:// or https:// (got {scheme})")]
    UnsupportedScheme { scheme: String },
    #[error("phone number may not contain {0:?}")]
    PhoneCharacter(char),
    #[error("phone number must have 7 to 15 digits (got {digits})")]
    PhoneLength { digits: usize },
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("not a valid email address")]
    InvalidEmail,
}

/// Accepts absolute `http`/`https` URLs with a host, e.g. a company website.
pub fn validate_url(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required { field: "web address" });
    }
    let parsed = Url::parse(value).map_err(|err| ValidationError::InvalidUrl {
        reason: err.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::UnsupportedScheme {
            scheme: parsed.scheme().to_string(),
        });
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::InvalidUrl {
            reason: "missing host".to_string(),
        });
    }
    Ok(())
}

/// Optional leading `+`, then digits with space, dash, dot or parenthesis
/// separators.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required { field: "phone number" });
    }
    let body = value.strip_prefix('+').unwrap_or(value);
    let mut digits = 0;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '.' | '(' | ')' => {}
            other => return Err(ValidationError::PhoneCharacter(other)),
        }
    }
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(ValidationError::PhoneLength { digits });
    }
    Ok(())
}

pub fn validate_password_match(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Required { field: "password" });
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required { field: "email" });
    }
    let Some((local, domain)) = value.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };
    let domain_ok = domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains('@');
    if local.is_empty() || !domain_ok || value.contains(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}
