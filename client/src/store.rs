//! In-memory token storage shared across request tasks

use tokio::sync::RwLock;

#[derive(Clone)]
struct Slots {
    access_token: String,
    refresh_token: String,
}

/// Holds the current token pair for a logged-in client
///
/// The access token is replaced on every successful refresh; the
/// refresh token is fixed for the lifetime of the session. When the
/// session ends (the server rejects the refresh token, or the refresh
/// times out), `clear` drops both so dead credentials are never sent
/// again; every read then returns `None` until a new login fills the
/// store.
pub struct TokenStore {
    slots: RwLock<Option<Slots>>,
}

impl TokenStore {
    /// Create a store from the token pair returned by login
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            slots: RwLock::new(Some(Slots {
                access_token: access_token.into(),
                refresh_token: refresh_token.into(),
            })),
        }
    }

    /// Current access token, `None` once the store has been cleared
    pub async fn access_token(&self) -> Option<String> {
        self.slots.read().await.as_ref().map(|s| s.access_token.clone())
    }

    /// The session's refresh token, `None` once the store has been cleared
    pub async fn refresh_token(&self) -> Option<String> {
        self.slots.read().await.as_ref().map(|s| s.refresh_token.clone())
    }

    /// Replace the access token after a successful refresh
    ///
    /// No-op on a cleared store: a refresh racing a clear must not
    /// resurrect the session.
    pub async fn set_access_token(&self, token: impl Into<String>) {
        if let Some(slots) = self.slots.write().await.as_mut() {
            slots.access_token = token.into();
        }
    }

    /// Store a fresh token pair after a new login
    pub async fn set_pair(&self, access_token: impl Into<String>, refresh_token: impl Into<String>) {
        *self.slots.write().await = Some(Slots {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        });
    }

    /// Drop both tokens; the caller must log in again
    pub async fn clear(&self) {
        *self.slots.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_round_trip() {
        let store = TokenStore::new("access-1", "refresh-1");

        assert_eq!(store.access_token().await.as_deref(), Some("access-1"));
        assert_eq!(store.refresh_token().await.as_deref(), Some("refresh-1"));

        store.set_access_token("access-2").await;
        assert_eq!(store.access_token().await.as_deref(), Some("access-2"));
        // Refresh token is untouched
        assert_eq!(store.refresh_token().await.as_deref(), Some("refresh-1"));
    }

    #[tokio::test]
    async fn test_clear_drops_both_tokens() {
        let store = TokenStore::new("access-1", "refresh-1");

        store.clear().await;
        assert_eq!(store.access_token().await, None);
        assert_eq!(store.refresh_token().await, None);

        // A late refresh result cannot resurrect the cleared session
        store.set_access_token("access-2").await;
        assert_eq!(store.access_token().await, None);
    }

    #[tokio::test]
    async fn test_new_login_refills_cleared_store() {
        let store = TokenStore::new("access-1", "refresh-1");
        store.clear().await;

        store.set_pair("access-2", "refresh-2").await;
        assert_eq!(store.access_token().await.as_deref(), Some("access-2"));
        assert_eq!(store.refresh_token().await.as_deref(), Some("refresh-2"));
    }
}
