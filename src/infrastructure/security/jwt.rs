//! Identity tokens.
//!
//! Compact HS256 JWTs carrying the username. Issuing is deterministic: the
//! same claims, timestamps and secret always produce the same token.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Fixed `iss` claim.
pub const TOKEN_ISSUER: &str = "test";

/// Fixed `sub` claim.
pub const TOKEN_SUBJECT: &str = "somebody";

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "Username")]
    pub username: String,
    /// Issuer
    pub iss: String,
    /// Subject
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Token errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Invalid token")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// Issue a signed token for `username`, valid until `expires_at`.
pub fn issue_token(
    username: &str,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    secret: &str,
) -> Result<String, TokenError> {
    let claims = Claims {
        username: username.to_string(),
        iss: TOKEN_ISSUER.to_string(),
        sub: TOKEN_SUBJECT.to_string(),
        exp: expires_at.timestamp(),
        iat: issued_at.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Check that a token splits into a readable header, payload and signature.
///
/// The signature segment is left to [`verify_token`], so a damaged signature
/// is reported as invalid rather than malformed.
fn check_structure(token: &str) -> Result<(), TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::Malformed);
    }

    decode_header(token).map_err(|_| TokenError::Malformed)?;

    let payload = URL_SAFE_NO_PAD
        .decode(segments[1])
        .map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice::<Claims>(&payload).map_err(|_| TokenError::Malformed)?;

    Ok(())
}

/// Verify a token as of `now` and return its username claim.
///
/// A token is expired from its `exp` second onwards.
pub fn verify_token(token: &str, secret: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
    check_structure(token)?;

    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked against the caller's clock below, without leeway.
    validation.validate_exp = false;
    validation.validate_aud = false;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| TokenError::InvalidSignature)?;

    if token_data.claims.exp <= now.timestamp() {
        return Err(TokenError::Expired);
    }

    Ok(token_data.claims.username)
}
