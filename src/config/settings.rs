//! Application settings and configuration structures.

use std::str::FromStr;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Database configuration (PostgreSQL)
    pub database: DatabaseSettings,

    /// JWT authentication settings
    pub jwt: JwtSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// PostgreSQL database configuration.
///
/// Either a full `url`, or the individual connection parts.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Full connection URL, takes precedence over the parts below
    pub url: Option<String>,

    pub host: String,

    pub port: u16,

    pub user: String,

    /// Usually injected via `DB_PASSWORD`
    pub password: String,

    /// Database name
    pub name: String,

    /// disable, allow, prefer, require, verify-ca or verify-full
    pub ssl_mode: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections to maintain
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout: u64,
}

/// JWT authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens
    pub secret: String,

    /// Token lifetime in minutes
    pub token_expiry_minutes: i64,
}

/// Minimum required length for JWT secret (256 bits = 32 bytes)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 3. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if JWT secret is too short.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        // Determine the running environment
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("database.host", "localhost")?
            .set_default("database.port", 5432)?
            .set_default("database.user", "postgres")?
            .set_default("database.password", "")?
            .set_default("database.name", "berliner")?
            .set_default("database.ssl_mode", "disable")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            // Fail after 10 seconds instead of hanging
            .set_default("database.acquire_timeout", 10)?
            .set_default("jwt.token_expiry_minutes", 60 * 24)?
            // Load from config files
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Load from environment variables
            // APP__DATABASE__HOST=db -> database.host = db
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            // Map simple environment variables
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("database.password", std::env::var("DB_PASSWORD").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .build()?
            .try_deserialize()
            .and_then(|settings: Self| {
                settings.validate()?;
                Ok(settings)
            })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        // Validate JWT secret length for security
        if self.jwt.secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::Message(format!(
                "JWT secret must be at least {} characters for security. Current length: {}",
                MIN_JWT_SECRET_LENGTH,
                self.jwt.secret.len()
            )));
        }
        if self.jwt.token_expiry_minutes <= 0 {
            return Err(ConfigError::Message(
                "JWT token expiry must be a positive number of minutes".into(),
            ));
        }
        Ok(())
    }
}

impl DatabaseSettings {
    /// Build connection options from the url or from the individual parts.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = self.url.as_deref().filter(|u| !u.is_empty()) {
            return PgConnectOptions::from_str(url);
        }

        let ssl_mode = PgSslMode::from_str(&self.ssl_mode)?;

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(ssl_mode))
    }
}
