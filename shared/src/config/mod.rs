//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token signing secrets, TTLs, and revocation policy
//! - `cache` - Redis configuration for the revocation store
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;

// Re-export commonly used types
pub use auth::TokenConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::Environment;
