//! Application Layer
//!
//! Business logic services consumed by the HTTP layer. Inputs are plain
//! domain values; outputs are values, booleans or field error maps.

pub mod services;
