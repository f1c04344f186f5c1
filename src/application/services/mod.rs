//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **ApiService**: Registration, authentication, tokens, channel creation

pub mod api_service;

pub use api_service::{ApiService, ApiServiceImpl, ServiceError};
