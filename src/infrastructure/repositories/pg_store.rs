//! PostgreSQL Store Implementation
//!
//! Implements [`Store`] over a connection pool and [`StoreTransaction`] over a
//! SQLx transaction. Both delegate to the same query functions, which run on
//! a single connection: a pooled one, or the one owning the transaction.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::domain::{Channel, Membership, Store, StoreTransaction, User};
use crate::shared::error::AppError;

/// Database row representation of the `"user"` table.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    password: String,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            password: self.password,
        }
    }
}

/// Database row representation of the `channel` table.
#[derive(Debug, sqlx::FromRow)]
struct ChannelRow {
    id: i64,
    name: String,
    leader_id: Option<i64>,
    description: String,
}

impl ChannelRow {
    fn into_channel(self) -> Channel {
        Channel {
            id: self.id,
            name: self.name,
            leader_id: self.leader_id,
            description: self.description,
        }
    }
}

fn conflict_or_database(e: sqlx::Error, message: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict(message.to_string())
        }
        _ => AppError::Database(e),
    }
}

async fn insert_user(conn: &mut PgConnection, user: &User) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO "user" (username, email, first_name, last_name, password)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.password)
    .execute(conn)
    .await
    .map_err(|e| conflict_or_database(e, "User with this username already exists"))?;

    Ok(())
}

async fn select_user_by_username(
    conn: &mut PgConnection,
    username: &str,
) -> Result<Option<User>, AppError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, username, email, first_name, last_name, password
        FROM "user"
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(conn)
    .await?;

    Ok(row.map(|r| r.into_user()))
}

async fn insert_channel(conn: &mut PgConnection, channel: &Channel) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO channel (name, leader_id, description)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(&channel.name)
    .bind(channel.leader_id)
    .bind(&channel.description)
    .execute(conn)
    .await
    .map_err(|e| conflict_or_database(e, "Channel with this name already exists"))?;

    Ok(())
}

async fn select_channel_by_name(
    conn: &mut PgConnection,
    name: &str,
) -> Result<Option<Channel>, AppError> {
    let row = sqlx::query_as::<_, ChannelRow>(
        r#"
        SELECT id, name, leader_id, description
        FROM channel
        WHERE name = $1
        "#,
    )
    .bind(name)
    .fetch_optional(conn)
    .await?;

    Ok(row.map(|r| r.into_channel()))
}

async fn insert_membership(
    conn: &mut PgConnection,
    membership: &Membership,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO membership (channel_id, user_id, is_editor)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(membership.channel_id)
    .bind(membership.user_id)
    .bind(membership.is_editor)
    .execute(conn)
    .await
    .map_err(|e| conflict_or_database(e, "User is already a member of this channel"))?;

    Ok(())
}

/// PostgreSQL store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a new PgStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    type Tx = PgTransaction;

    async fn begin(&self) -> Result<PgTransaction, AppError> {
        let tx = self.pool.begin().await?;
        Ok(PgTransaction { tx })
    }

    async fn add_user(&self, user: &User) -> Result<(), AppError> {
        let mut conn = self.pool.acquire().await?;
        insert_user(&mut conn, user).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let mut conn = self.pool.acquire().await?;
        select_user_by_username(&mut conn, username).await
    }

    async fn add_channel(&self, channel: &Channel) -> Result<(), AppError> {
        let mut conn = self.pool.acquire().await?;
        insert_channel(&mut conn, channel).await
    }

    async fn get_channel_by_name(&self, name: &str) -> Result<Option<Channel>, AppError> {
        let mut conn = self.pool.acquire().await?;
        select_channel_by_name(&mut conn, name).await
    }

    async fn add_membership(&self, membership: &Membership) -> Result<(), AppError> {
        let mut conn = self.pool.acquire().await?;
        insert_membership(&mut conn, membership).await
    }
}

/// A PostgreSQL transaction. Rolled back on drop unless committed.
pub struct PgTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreTransaction for PgTransaction {
    async fn add_user(&mut self, user: &User) -> Result<(), AppError> {
        insert_user(&mut *self.tx, user).await
    }

    async fn get_user_by_username(&mut self, username: &str) -> Result<Option<User>, AppError> {
        select_user_by_username(&mut *self.tx, username).await
    }

    async fn add_channel(&mut self, channel: &Channel) -> Result<(), AppError> {
        insert_channel(&mut *self.tx, channel).await
    }

    async fn get_channel_by_name(&mut self, name: &str) -> Result<Option<Channel>, AppError> {
        select_channel_by_name(&mut *self.tx, name).await
    }

    async fn add_membership(&mut self, membership: &Membership) -> Result<(), AppError> {
        insert_membership(&mut *self.tx, membership).await
    }

    async fn commit(self) -> Result<(), AppError> {
        self.tx.commit().await.map_err(AppError::Database)
    }

    async fn rollback(self) -> Result<(), AppError> {
        self.tx.rollback().await.map_err(AppError::Database)
    }
}
