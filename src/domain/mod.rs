//! # Domain Layer
//!
//! Entities and the persistence contract of the Berliner backend.
//! It is independent of any infrastructure or presentation concerns.
//!
//! ## Structure
//!
//! - **entities**: User, Channel, Membership, AuthorizationForm
//! - **store**: Transactional store traits and the transaction runner

pub mod entities;
pub mod store;

// Re-export commonly used types
pub use entities::*;
pub use store::{with_transaction, Store, StoreTransaction};
