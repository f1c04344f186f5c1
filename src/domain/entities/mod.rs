//! # Domain Entities
//!
//! Core domain entities. All entities map directly to their database tables.
//!
//! - **User**: Registered account with hashed password
//! - **Channel**: A group space with exactly one leader at creation time
//! - **Membership**: A user's membership in a channel, with an editor flag
//! - **AuthorizationForm**: Login credentials, never persisted

mod channel;
mod membership;
mod user;

pub use channel::Channel;
pub use membership::Membership;
pub use user::{AuthorizationForm, User};
