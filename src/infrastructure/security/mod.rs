//! Security Primitives
//!
//! Password digests, identity tokens and the token signing secret.

pub mod jwt;
pub mod password;
pub mod secret;

pub use jwt::{issue_token, verify_token, Claims, TokenError};
pub use password::{hash_password, verify_password, PasswordError, MAX_PASSWORD_BYTES};
pub use secret::SigningSecret;
