//! Shared utilities and common types for TokenGate server crates
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types (tokens, cache, database, environment)
//! - Duration-string parsing for TTL settings
//! - Validation helpers for client metadata

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{CacheConfig, DatabaseConfig, Environment, TokenConfig};
pub use utils::{duration, validation};
