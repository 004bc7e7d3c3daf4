//! Redis-backed revocation store
//!
//! Revocation entries are plain keys with a TTL; Redis expiry does the
//! garbage collection. Two keyspaces exist:
//!
//! - `revoked:token:{jti}` for single-token revocation (logout)
//! - `revoked:subject:{subject}` for blanket revocation (logout-all)
//!
//! Keys additionally carry the configured cache prefix, if any.

use async_trait::async_trait;
use tracing::debug;

use tg_core::errors::{DomainError, StoreError};
use tg_core::repositories::RevocationStore;

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// Value stored under revocation keys; only key presence matters
const REVOKED_MARKER: &str = "1";

/// Redis implementation of `RevocationStore`
#[derive(Clone)]
pub struct RedisRevocationStore {
    client: RedisClient,
}

impl RedisRevocationStore {
    /// Create a new revocation store on top of an existing client
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn token_key(&self, jti: &str) -> String {
        self.client.config().make_key(&format!("revoked:token:{}", jti))
    }

    fn subject_key(&self, subject: &str) -> String {
        self.client
            .config()
            .make_key(&format!("revoked:subject:{}", subject))
    }
}

/// Every infrastructure failure surfaces as an unavailable store; the
/// domain layer decides whether that fails open or closed.
fn store_error(e: InfrastructureError) -> DomainError {
    StoreError::Unavailable {
        message: e.to_string(),
    }
    .into()
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn revoke_token(&self, jti: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        // SETEX rejects a zero TTL; an already-expired token needs no entry
        if ttl_seconds == 0 {
            debug!(jti = %jti, "skipping revocation of already-expired token");
            return Ok(());
        }

        self.client
            .set_with_expiry(&self.token_key(jti), REVOKED_MARKER, ttl_seconds)
            .await
            .map_err(store_error)?;

        debug!(jti = %jti, ttl = ttl_seconds, "token revoked");
        Ok(())
    }

    async fn is_token_revoked(&self, jti: &str) -> Result<bool, DomainError> {
        self.client
            .exists(&self.token_key(jti))
            .await
            .map_err(store_error)
    }

    async fn revoke_subject(&self, subject: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        if ttl_seconds == 0 {
            return Ok(());
        }

        self.client
            .set_with_expiry(&self.subject_key(subject), REVOKED_MARKER, ttl_seconds)
            .await
            .map_err(store_error)?;

        debug!(subject = %subject, ttl = ttl_seconds, "subject revoked");
        Ok(())
    }

    async fn is_subject_revoked(&self, subject: &str) -> Result<bool, DomainError> {
        self.client
            .exists(&self.subject_key(subject))
            .await
            .map_err(store_error)
    }
}
