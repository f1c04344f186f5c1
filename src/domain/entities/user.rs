//! User entity and the login form.
//!
//! Maps to the `"user"` table in the database schema.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::shared::validation::{EMAIL_REGEX, USERNAME_REGEX};

/// Represents a registered user.
///
/// Maps to the `"user"` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - username: VARCHAR(30) NOT NULL UNIQUE
/// - email: VARCHAR(255) NOT NULL
/// - first_name: VARCHAR(255) NOT NULL
/// - last_name: VARCHAR(255) NOT NULL
/// - password: VARCHAR(255) NOT NULL (Argon2 PHC string)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Assigned by the store on insert
    #[serde(default)]
    pub id: i64,

    #[validate(regex(path = *USERNAME_REGEX, message = "Invalid username"))]
    pub username: String,

    #[validate(
        regex(path = *EMAIL_REGEX, message = "Invalid email"),
        length(max = 255, message = "Email is too long")
    )]
    pub email: String,

    #[validate(length(max = 255, message = "First name is too long"))]
    pub first_name: String,

    #[validate(length(max = 255, message = "Last name is too long"))]
    pub last_name: String,

    /// Plaintext on registration input, a password digest once stored
    #[serde(skip_serializing, default)]
    pub password: String,
}

/// Credentials submitted on login. Never persisted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorizationForm {
    pub username: String,
    pub password: String,
}

impl AuthorizationForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}
