//! Application Startup
//!
//! Connects to the database, brings the schema up to date and wires the
//! API service the HTTP layer calls into.

use std::sync::Arc;

use anyhow::Result;
use sqlx::PgPool;

use crate::application::services::ApiServiceImpl;
use crate::config::Settings;
use crate::infrastructure::database;
use crate::infrastructure::repositories::PgStore;
use crate::infrastructure::security::SigningSecret;

/// Service type backed by PostgreSQL
pub type PgApiService = ApiServiceImpl<PgStore>;

/// Application instance
pub struct Application {
    pool: PgPool,
    service: Arc<PgApiService>,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        // Create database pool
        let pool = database::create_pool(&settings.database).await?;
        tracing::info!("Database connection pool created");

        database::run_migrations(&pool).await?;
        tracing::info!("Database migrations applied");

        let store = Arc::new(PgStore::new(pool.clone()));
        let secret = SigningSecret::new(settings.jwt.secret.clone());
        let token_lifetime = chrono::Duration::minutes(settings.jwt.token_expiry_minutes);

        let service = Arc::new(ApiServiceImpl::new(store, secret, token_lifetime));

        Ok(Self { pool, service })
    }

    /// The API service, shareable across request handlers
    pub fn service(&self) -> Arc<PgApiService> {
        Arc::clone(&self.service)
    }

    /// Close the connection pool
    pub async fn shutdown(self) {
        self.pool.close().await;
        tracing::info!("Database connection pool closed");
    }
}
