//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, ConfigError, StoreError, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DomainError {
    /// Whether the caller should surface this as an unauthorized response
    ///
    /// Token and auth errors are always unauthorized. Store errors count
    /// too: the fail-closed policy turns an unreachable store into a
    /// denial, while callers keep the distinct variant for logging.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            DomainError::Auth(_) | DomainError::Token(_) | DomainError::Store(_)
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
