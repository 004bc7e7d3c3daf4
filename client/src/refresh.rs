//! Single-flight coordination of token refresh
//!
//! Many in-flight requests can hit 401 at the same moment when the
//! access token expires. Only one of them should call the refresh
//! endpoint; the rest wait and reuse its result.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::ClientError;
use crate::store::TokenStore;
use crate::transport::RefreshTransport;

/// Coalesces concurrent refresh attempts into one transport call
///
/// The gate serializes refreshers. After acquiring it, a task compares
/// the stored access token against the stale one it was holding when it
/// got 401: if they differ, another task already refreshed while this
/// one waited, and the stored token is reused without a network call.
///
/// A refresh failure that ends the session (rejected refresh token, or
/// a refresh timeout) clears the store, so no later request sends the
/// dead credentials; those tasks see `NotAuthenticated` instead.
pub struct RefreshCoordinator<T: RefreshTransport> {
    transport: Arc<T>,
    store: Arc<TokenStore>,
    gate: Mutex<()>,
}

impl<T: RefreshTransport> RefreshCoordinator<T> {
    /// Create a coordinator over the shared token store
    pub fn new(transport: Arc<T>, store: Arc<TokenStore>) -> Self {
        Self {
            transport,
            store,
            gate: Mutex::new(()),
        }
    }

    /// The token store this coordinator updates
    pub fn store(&self) -> &Arc<TokenStore> {
        &self.store
    }

    /// Obtain a usable access token after `stale_token` was rejected
    ///
    /// Returns the token to retry with. Errors mean the refresh itself
    /// failed; `ClientError::requires_login` tells the caller whether
    /// the session is over.
    pub async fn refresh_after_unauthorized(
        &self,
        stale_token: &str,
    ) -> Result<String, ClientError> {
        let _guard = self.gate.lock().await;

        // A failed refresh ahead of us already ended the session
        let current = self
            .store
            .access_token()
            .await
            .ok_or(ClientError::NotAuthenticated)?;

        // Someone else refreshed while we waited on the gate
        if current != stale_token {
            debug!("reusing access token refreshed by a concurrent request");
            return Ok(current);
        }

        let refresh_token = self
            .store
            .refresh_token()
            .await
            .ok_or(ClientError::NotAuthenticated)?;

        match self.transport.refresh(&refresh_token).await {
            Ok(new_token) => {
                self.store.set_access_token(new_token.clone()).await;
                info!("access token refreshed");
                Ok(new_token)
            }
            Err(e) => {
                // Session-ending failures drop the dead credentials
                if e.requires_login() {
                    warn!(error = %e, "refresh ended the session; clearing stored tokens");
                    self.store.clear().await;
                }
                Err(e)
            }
        }
    }
}
