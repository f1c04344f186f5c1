//! Password hashing with Argon2id.
//!
//! Digests are PHC strings carrying their own salt and cost parameters, so
//! verification needs nothing but the stored digest.

use argon2::{
    password_hash::{self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Longest accepted password, in bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Password hashing errors
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password exceeds {} bytes", MAX_PASSWORD_BYTES)]
    TooLong,

    #[error("Malformed password digest: {0}")]
    MalformedDigest(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

/// Hash a password using Argon2id with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(PasswordError::TooLong);
    }

    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hashing(e.to_string()))
}

/// Verify a password against its digest.
///
/// A wrong password is `Ok(false)`; only an unreadable digest is an error.
pub fn verify_password(digest: &str, password: &str) -> Result<bool, PasswordError> {
    let parsed_hash =
        PasswordHash::new(digest).map_err(|e| PasswordError::MalformedDigest(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::MalformedDigest(e.to_string())),
    }
}
