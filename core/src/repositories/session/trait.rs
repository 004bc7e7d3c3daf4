//! Session repository trait defining the interface for session persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::session::Session;
use crate::errors::DomainError;

/// Repository trait for Session entity persistence operations
///
/// One session row exists per successful login. Sessions are never
/// hard-deleted by logout; they are flipped inactive and retained for
/// audit, with `delete_expired_before` available for retention pruning.
///
/// # Security Considerations
/// - The `token_hash` column holds a SHA-256 hash, never a raw token
/// - `token_hash` must be unique and indexed
/// - Invalidation must be a single-row atomic update
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a new session
    ///
    /// # Returns
    /// * `Ok(Session)` - The saved session
    /// * `Err(DomainError)` - Save failed (e.g., duplicate token hash)
    async fn create(&self, session: Session) -> Result<Session, DomainError>;

    /// Find a session by the hash of its refresh token
    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, DomainError>;

    /// Find a session by its ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Session>, DomainError>;

    /// Find all sessions belonging to a user, newest first
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Session>, DomainError>;

    /// Set `is_active = false` on a session
    ///
    /// Idempotent: invalidating an already-inactive session is a no-op.
    ///
    /// # Returns
    /// * `Ok(true)` - The session was active and is now inactive
    /// * `Ok(false)` - The session was missing or already inactive
    async fn invalidate(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Set `is_active = false` on every active session for a user
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of sessions affected
    async fn invalidate_all_for_user(&self, user_id: &str) -> Result<usize, DomainError>;

    /// Delete sessions whose expiry is older than `cutoff` (retention)
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of rows deleted
    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError>;

    /// Count sessions that still authorize for a user
    async fn count_active_for_user(&self, user_id: &str) -> Result<usize, DomainError> {
        let sessions = self.find_by_user(user_id).await?;
        Ok(sessions.iter().filter(|s| s.is_authorizing()).count())
    }
}
