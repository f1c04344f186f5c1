//! Transactional Store
//!
//! Persistence contract for users, channels and memberships. The traits are
//! defined in the domain layer and implemented in the infrastructure layer.
//!
//! Multi-statement work goes through [`with_transaction`], which commits on
//! success and rolls back on every error path.

use std::future::Future;

use async_trait::async_trait;

use crate::domain::{Channel, Membership, User};
use crate::shared::error::AppError;

/// Store operations outside of an explicit transaction.
///
/// Uniqueness violations are reported as [`AppError::Conflict`].
#[async_trait]
pub trait Store: Send + Sync {
    /// Transaction handle produced by [`Store::begin`].
    type Tx: StoreTransaction;

    /// Begin a new transaction.
    async fn begin(&self) -> Result<Self::Tx, AppError>;

    /// Insert a user. The user's password must already be hashed.
    async fn add_user(&self, user: &User) -> Result<(), AppError>;

    /// Find a user by username.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Insert a channel.
    async fn add_channel(&self, channel: &Channel) -> Result<(), AppError>;

    /// Find a channel by name.
    async fn get_channel_by_name(&self, name: &str) -> Result<Option<Channel>, AppError>;

    /// Insert a membership.
    async fn add_membership(&self, membership: &Membership) -> Result<(), AppError>;
}

/// The same operations scoped to one atomic unit of work.
///
/// Dropping a transaction without committing rolls it back.
#[async_trait]
pub trait StoreTransaction: Send {
    async fn add_user(&mut self, user: &User) -> Result<(), AppError>;

    async fn get_user_by_username(&mut self, username: &str) -> Result<Option<User>, AppError>;

    async fn add_channel(&mut self, channel: &Channel) -> Result<(), AppError>;

    async fn get_channel_by_name(&mut self, name: &str) -> Result<Option<Channel>, AppError>;

    async fn add_membership(&mut self, membership: &Membership) -> Result<(), AppError>;

    /// Make every write of this transaction visible.
    async fn commit(self) -> Result<(), AppError>;

    /// Discard every write of this transaction.
    async fn rollback(self) -> Result<(), AppError>;
}

/// Execute a closure within a transaction.
///
/// The closure owns the transaction and hands it back together with its
/// result. `Ok` commits, `Err` rolls back. If the rollback itself fails the
/// failure is logged and the closure's error is returned.
///
/// # Example
/// ```ignore
/// let id = with_transaction(store, |mut tx| async move {
///     let result = insert_everything(&mut tx).await;
///     (tx, result)
/// })
/// .await?;
/// ```
pub async fn with_transaction<S, F, Fut, T>(store: &S, f: F) -> Result<T, AppError>
where
    S: Store,
    F: FnOnce(S::Tx) -> Fut + Send,
    Fut: Future<Output = (S::Tx, Result<T, AppError>)> + Send,
    T: Send,
{
    let tx = store.begin().await?;

    match f(tx).await {
        (tx, Ok(value)) => {
            tx.commit().await?;
            Ok(value)
        }
        (tx, Err(e)) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(e)
        }
    }
}
