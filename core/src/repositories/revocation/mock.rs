//! Mock implementation of RevocationStore for testing

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::{DomainError, StoreError};

use super::r#trait::RevocationStore;

/// In-memory revocation store for testing
///
/// Entries expire by wall clock like their Redis counterparts, and the
/// store can be flipped into an "unavailable" mode to exercise the
/// fail-closed paths.
#[derive(Default)]
pub struct MockRevocationStore {
    entries: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
    unavailable: AtomicBool,
}

impl MockRevocationStore {
    /// Create a new mock store
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a store outage
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                message: "mock revocation store offline".to_string(),
            }
            .into());
        }
        Ok(())
    }

    async fn insert(&self, key: String, ttl_seconds: u64) {
        let expires_at = Utc::now() + Duration::seconds(ttl_seconds as i64);
        self.entries.write().await.insert(key, expires_at);
    }

    async fn contains(&self, key: &str) -> bool {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(expires_at) => *expires_at > Utc::now(),
            None => false,
        }
    }
}

#[async_trait]
impl RevocationStore for MockRevocationStore {
    async fn revoke_token(&self, jti: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        self.check_available()?;
        self.insert(format!("token:{}", jti), ttl_seconds).await;
        Ok(())
    }

    async fn is_token_revoked(&self, jti: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        Ok(self.contains(&format!("token:{}", jti)).await)
    }

    async fn revoke_subject(&self, subject: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        self.check_available()?;
        self.insert(format!("subject:{}", subject), ttl_seconds).await;
        Ok(())
    }

    async fn is_subject_revoked(&self, subject: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        Ok(self.contains(&format!("subject:{}", subject)).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_revoke_and_lookup() {
        let store = MockRevocationStore::new();

        assert!(!store.is_token_revoked("jti-1").await.unwrap());
        store.revoke_token("jti-1", 60).await.unwrap();
        assert!(store.is_token_revoked("jti-1").await.unwrap());

        // Revoking again is a no-op beyond refreshing the TTL
        store.revoke_token("jti-1", 60).await.unwrap();
        assert!(store.is_token_revoked("jti-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_subject_revocation_is_separate_keyspace() {
        let store = MockRevocationStore::new();

        store.revoke_subject("u1", 60).await.unwrap();
        assert!(store.is_subject_revoked("u1").await.unwrap());
        assert!(!store.is_token_revoked("u1").await.unwrap());
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let store = MockRevocationStore::new();

        store.revoke_token("jti-short", 0).await.unwrap();
        assert!(!store.is_token_revoked("jti-short").await.unwrap());
    }

    #[tokio::test]
    async fn test_unavailable_store_errors() {
        let store = MockRevocationStore::new();
        store.set_unavailable(true);

        let err = store.is_token_revoked("jti-1").await.unwrap_err();
        assert!(matches!(err, DomainError::Store(_)));
    }
}
