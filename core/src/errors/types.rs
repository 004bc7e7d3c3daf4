//! Domain-specific error types for authentication and token operations
//!
//! Four concerns, four enums: configuration problems are fatal and never
//! retried; token errors cover everything a bad credential string can be;
//! auth errors cover credentials that verified but no longer authorize;
//! store errors cover transient infrastructure failures, which the auth
//! service surfaces as unauthorized under the fail-closed policy.

use thiserror::Error;

/// Configuration errors, surfaced at startup or on first use
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing signing secret: {name}")]
    MissingSecret { name: String },

    #[error("Invalid configuration value for {name}: {message}")]
    InvalidValue { name: String, message: String },
}

/// Token verification and issuance errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Token signed for wrong class: expected {expected}")]
    WrongClass { expected: String },

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Authorization errors: the credential verified but does not authorize
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Session not found")]
    SessionNotFound,

    #[error("Session expired")]
    SessionExpired,

    #[error("Session invalidated")]
    SessionInvalidated,
}

/// Transient infrastructure failures from the session or revocation store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {message}")]
    Unavailable { message: String },
}

/// Validation errors for entity construction
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Duplicate value: {field}")]
    DuplicateValue { field: String },
}
