//! Validation Utilities
//!
//! Field-level checks for users and channels. Results are a plain
//! field -> message map; an empty map means the entity is valid.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidationErrors};

use crate::domain::{Channel, User};

/// Field name -> human readable message.
pub type FieldErrors = HashMap<String, String>;

/// Key used for errors that do not belong to a single field.
pub const COMMON_ERROR_KEY: &str = "common";

/// 2-30 characters, letters, digits and underscores.
pub static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{2,30}$").expect("username pattern compiles"));

/// `local@domain.tld`
pub static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("email pattern compiles"));

/// At least one non-whitespace character.
pub static NOT_BLANK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S").expect("not-blank pattern compiles"));

/// Collapse validator output into one message per field.
pub fn field_errors(errors: ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let message = errs
                .first()
                .and_then(|e| e.message.clone())
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid {}", field));
            (field.to_string(), message)
        })
        .collect()
}

fn check<T: Validate>(value: &T) -> FieldErrors {
    match value.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => field_errors(errors),
    }
}

/// Validate a user before registration.
pub fn validate_user(user: &User) -> FieldErrors {
    check(user)
}

/// Validate a channel before creation. Name uniqueness is left to the store.
pub fn validate_channel(channel: &Channel) -> FieldErrors {
    check(channel)
}
