//! # Infrastructure Layer
//!
//! Concrete implementations behind the `tg_core` repository traits:
//!
//! - **Database**: MySQL session store using SQLx
//! - **Cache**: Redis client and the revocation store built on it
//!
//! The domain layer only sees the traits; everything Redis- or
//! MySQL-specific lives here.

// Re-export core error types for convenience
pub use tg_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and revocation store
pub mod cache;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}
