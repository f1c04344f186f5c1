//! Store Implementations
//!
//! PostgreSQL implementation of the domain store traits.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use berliner::infrastructure::repositories::PgStore;
//!
//! fn setup_store(pool: PgPool) -> PgStore {
//!     PgStore::new(pool)
//! }
//! ```

pub mod pg_store;

pub use pg_store::{PgStore, PgTransaction};
