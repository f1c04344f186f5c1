//! # Berliner Backend Core
//!
//! Domain service layer of the Berliner social network:
//! - User registration and authentication (Argon2 digests, HS256 tokens)
//! - Channel creation paired atomically with the leader's membership
//! - PostgreSQL persistence behind a transactional store interface
//!
//! ## Architecture
//!
//! - **Domain Layer**: Entities and the transactional store traits
//! - **Application Layer**: The API service consumed by the HTTP layer
//! - **Infrastructure Layer**: PostgreSQL store, password and token codecs
//!
//! ## Module Structure
//!
//! ```text
//! berliner/
//! +-- config/         Configuration management
//! +-- domain/         Entities and store traits
//! +-- application/    API service
//! +-- infrastructure/ Database, store implementation, security primitives
//! +-- shared/         Errors and validation
//! ```

// Configuration module
pub mod config;

// Domain layer - Entities and persistence contract
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Shared utilities
pub mod shared;

// Application startup and wiring
pub mod startup;

// Telemetry and observability
pub mod telemetry;
