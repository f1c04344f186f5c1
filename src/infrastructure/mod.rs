//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database pool and migrations (PostgreSQL)
//! - Store implementations (PostgreSQL)
//! - Password hashing and token signing

pub mod database;
pub mod repositories;
pub mod security;
