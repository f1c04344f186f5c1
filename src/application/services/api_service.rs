//! Berliner API Service
//!
//! Registration, authentication, identity tokens and channel creation.
//!
//! The service owns no mutable state besides the signing secret handle; all
//! shared state lives in the store, so one instance serves every request.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::domain::{with_transaction, AuthorizationForm, Channel, Membership, Store, StoreTransaction, User};
use crate::infrastructure::security::{
    hash_password, issue_token, verify_password, verify_token, PasswordError, SigningSecret, TokenError,
};
use crate::shared::error::AppError;
use crate::shared::validation::{validate_channel, validate_user, FieldErrors, COMMON_ERROR_KEY};

/// API service trait for dependency injection
#[async_trait]
pub trait ApiService: Send + Sync {
    /// Register a new user.
    ///
    /// Returns the validation errors, or a `"common"` entry if the username is
    /// taken. An empty map means the user was stored.
    async fn add_user(&self, user: User) -> Result<FieldErrors, ServiceError>;

    /// Check a username/password pair.
    ///
    /// A wrong password is `Ok(false)`. An unknown username is
    /// `Err(ServiceError::UserNotFound)`; callers must report both the same way.
    /// An unknown username returns before any hashing, so the two cases differ
    /// in latency.
    async fn check_user_and_password(&self, form: &AuthorizationForm) -> Result<bool, ServiceError>;

    /// Sign a token for the form's username. Credentials are not checked.
    fn generate_token(
        &self,
        form: &AuthorizationForm,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<String, ServiceError>;

    /// Verify a token and return its username.
    fn parse_token(&self, token: &str) -> Result<String, ServiceError>;

    /// Check credentials and, if they match, sign a token valid for the
    /// configured lifetime.
    async fn sign_in(&self, form: &AuthorizationForm) -> Result<String, ServiceError>;

    /// Get user by username
    async fn get_user_by_username(&self, username: &str) -> Result<User, ServiceError>;

    /// Create a channel led by `user`, together with the leader's editor
    /// membership. Both rows are written in one transaction.
    async fn create_channel(&self, channel: Channel, user: &User) -> Result<FieldErrors, ServiceError>;

    /// Get channel by name
    async fn get_channel_by_name(&self, name: &str) -> Result<Channel, ServiceError>;
}

/// API service errors
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("User not found")]
    UserNotFound,

    #[error("Channel not found")]
    ChannelNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] AppError),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::UserNotFound => AppError::NotFound("User not found".into()),
            ServiceError::ChannelNotFound => AppError::NotFound("Channel not found".into()),
            ServiceError::InvalidCredentials => AppError::Unauthorized("Invalid credentials".into()),
            ServiceError::Password(e @ PasswordError::TooLong) => AppError::BadRequest(e.to_string()),
            ServiceError::Password(e) => AppError::Internal(e.to_string()),
            ServiceError::Token(TokenError::Malformed) => AppError::BadRequest("Malformed token".into()),
            ServiceError::Token(TokenError::Expired) => AppError::Unauthorized("Token expired".into()),
            ServiceError::Token(TokenError::InvalidSignature) => {
                AppError::Unauthorized("Invalid token".into())
            }
            ServiceError::Token(e @ TokenError::Signing(_)) => AppError::Internal(e.to_string()),
            ServiceError::Store(e) => e,
        }
    }
}

fn common_error(message: String) -> FieldErrors {
    FieldErrors::from([(COMMON_ERROR_KEY.to_string(), message)])
}

/// Insert the channel, read back its id, then add the leader membership.
async fn insert_channel_with_leader<T: StoreTransaction>(
    tx: &mut T,
    channel: &Channel,
) -> Result<i64, AppError> {
    tx.add_channel(channel).await?;

    let stored = tx
        .get_channel_by_name(&channel.name)
        .await?
        .ok_or_else(|| AppError::Internal(format!("Channel {} missing after insert", channel.name)))?;

    let leader_id = stored
        .leader_id
        .ok_or_else(|| AppError::Internal(format!("Channel {} stored without leader", stored.name)))?;

    tx.add_membership(&Membership::leader(leader_id, stored.id)).await?;

    Ok(stored.id)
}

/// ApiService implementation
pub struct ApiServiceImpl<S>
where
    S: Store,
{
    store: Arc<S>,
    secret: SigningSecret,
    token_lifetime: Duration,
}

impl<S> ApiServiceImpl<S>
where
    S: Store,
{
    /// Create a new ApiServiceImpl
    pub fn new(store: Arc<S>, secret: SigningSecret, token_lifetime: Duration) -> Self {
        Self {
            store,
            secret,
            token_lifetime,
        }
    }

    /// Handle to the signing secret, for rotation.
    pub fn signing_secret(&self) -> &SigningSecret {
        &self.secret
    }
}

#[async_trait]
impl<S> ApiService for ApiServiceImpl<S>
where
    S: Store + 'static,
{
    async fn add_user(&self, mut user: User) -> Result<FieldErrors, ServiceError> {
        let invalid = validate_user(&user);
        if !invalid.is_empty() {
            debug!(username = %user.username, errors = ?invalid, "User rejected by validation");
            return Ok(invalid);
        }

        user.password = hash_password(&user.password)?;

        match self.store.add_user(&user).await {
            Ok(()) => {
                info!(username = %user.username, "User registered");
                Ok(FieldErrors::new())
            }
            Err(AppError::Conflict(message)) => {
                warn!(username = %user.username, "Registration conflict: {}", message);
                Ok(common_error(message))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn check_user_and_password(&self, form: &AuthorizationForm) -> Result<bool, ServiceError> {
        let user = self
            .store
            .get_user_by_username(&form.username)
            .await?
            .ok_or(ServiceError::UserNotFound)?;

        let matches = verify_password(&user.password, &form.password)?;
        if !matches {
            debug!(username = %form.username, "Password mismatch");
        }

        Ok(matches)
    }

    fn generate_token(
        &self,
        form: &AuthorizationForm,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<String, ServiceError> {
        Ok(issue_token(&form.username, issued_at, expires_at, &self.secret.current())?)
    }

    fn parse_token(&self, token: &str) -> Result<String, ServiceError> {
        Ok(verify_token(token, &self.secret.current(), Utc::now())?)
    }

    async fn sign_in(&self, form: &AuthorizationForm) -> Result<String, ServiceError> {
        match self.check_user_and_password(form).await {
            Ok(true) => {}
            Ok(false) | Err(ServiceError::UserNotFound) => {
                debug!(username = %form.username, "Sign-in refused");
                return Err(ServiceError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        }

        let now = Utc::now();
        let token = self.generate_token(form, now, now + self.token_lifetime)?;
        info!(username = %form.username, "User signed in");

        Ok(token)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<User, ServiceError> {
        self.store
            .get_user_by_username(username)
            .await?
            .ok_or(ServiceError::UserNotFound)
    }

    async fn create_channel(&self, mut channel: Channel, user: &User) -> Result<FieldErrors, ServiceError> {
        channel.leader_id = Some(user.id);

        let invalid = validate_channel(&channel);
        if !invalid.is_empty() {
            debug!(channel = %channel.name, errors = ?invalid, "Channel rejected by validation");
            return Ok(invalid);
        }

        let name = channel.name.clone();
        let created = with_transaction(self.store.as_ref(), |mut tx| async move {
            let result = insert_channel_with_leader(&mut tx, &channel).await;
            (tx, result)
        })
        .await;

        match created {
            Ok(channel_id) => {
                info!(channel_id, channel = %name, leader_id = user.id, "Channel created");
                Ok(FieldErrors::new())
            }
            Err(AppError::Conflict(message)) => {
                warn!(channel = %name, "Channel creation rolled back: {}", message);
                Ok(common_error(message))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_channel_by_name(&self, name: &str) -> Result<Channel, ServiceError> {
        self.store
            .get_channel_by_name(name)
            .await?
            .ok_or(ServiceError::ChannelNotFound)
    }
}
