//! Revocation store trait: a TTL'd deny-list for otherwise valid tokens.

use async_trait::async_trait;

use crate::errors::DomainError;

/// Fast key-value deny-list consulted at verification time
///
/// A hit always wins over a valid signature. Entries carry a TTL equal
/// to the remaining lifetime of the token class they target, so the
/// store self-cleans once the token would have expired anyway.
///
/// All operations are single-key and atomic; implementations must not
/// require cross-key transactions. An unreachable store surfaces as
/// `StoreError::Unavailable` and the caller decides the fail-closed
/// policy.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Record a revocation for a specific token identifier (jti)
    ///
    /// Idempotent: revoking twice only refreshes the TTL.
    async fn revoke_token(&self, jti: &str, ttl_seconds: u64) -> Result<(), DomainError>;

    /// Check whether a token identifier has been revoked
    async fn is_token_revoked(&self, jti: &str) -> Result<bool, DomainError>;

    /// Record a blanket revocation for every token of a subject
    ///
    /// Used for "log out everywhere"; verification must consult this in
    /// addition to the specific token key.
    async fn revoke_subject(&self, subject: &str, ttl_seconds: u64) -> Result<(), DomainError>;

    /// Check whether a subject has a blanket revocation in effect
    async fn is_subject_revoked(&self, subject: &str) -> Result<bool, DomainError>;
}
