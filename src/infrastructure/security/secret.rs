//! Token signing secret.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

/// Shared, rotatable HMAC secret.
///
/// Clones share the same value, so a rotation is seen by every holder on its
/// next read.
#[derive(Clone)]
pub struct SigningSecret {
    inner: Arc<RwLock<String>>,
}

impl SigningSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(secret.into())),
        }
    }

    /// The secret as of now.
    pub fn current(&self) -> String {
        self.inner.read().clone()
    }

    /// Replace the secret. Tokens signed with the old one stop verifying.
    pub fn rotate(&self, secret: impl Into<String>) {
        *self.inner.write() = secret.into();
        tracing::info!("Token signing secret rotated");
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(***)")
    }
}
