//! Authenticated request pipeline with retry-once recovery

use std::sync::Arc;

use tracing::debug;

use crate::error::ClientError;
use crate::refresh::RefreshCoordinator;
use crate::store::TokenStore;
use crate::transport::{OutboundRequest, OutboundResponse, RefreshTransport, RequestExecutor};

/// Client that attaches the access token and recovers from expiry
///
/// Every request goes out with the current access token. A 401 answer
/// triggers exactly one refresh (coalesced across concurrent requests)
/// and one retry with the new token; a second 401 is returned to the
/// caller unchanged, since it no longer signals an expired token.
pub struct AuthClient<E, T>
where
    E: RequestExecutor,
    T: RefreshTransport,
{
    executor: Arc<E>,
    refresher: RefreshCoordinator<T>,
}

impl<E, T> AuthClient<E, T>
where
    E: RequestExecutor,
    T: RefreshTransport,
{
    /// Create a client over an executor, refresh transport, and the
    /// token pair obtained at login
    pub fn new(executor: Arc<E>, transport: Arc<T>, store: Arc<TokenStore>) -> Self {
        Self {
            executor,
            refresher: RefreshCoordinator::new(transport, store),
        }
    }

    /// The shared token store
    pub fn store(&self) -> &Arc<TokenStore> {
        self.refresher.store()
    }

    /// Send a request, refreshing and retrying once on 401
    ///
    /// Returns `NotAuthenticated` when no tokens are held (never logged
    /// in, or a failed refresh already cleared the store).
    pub async fn send(&self, request: OutboundRequest) -> Result<OutboundResponse, ClientError> {
        let token = self
            .refresher
            .store()
            .access_token()
            .await
            .ok_or(ClientError::NotAuthenticated)?;
        let response = self.executor.execute(&request, &token).await?;

        if !response.is_unauthorized() {
            return Ok(response);
        }

        debug!(url = %request.url, "access token rejected; refreshing");
        let new_token = self.refresher.refresh_after_unauthorized(&token).await?;

        // One retry only; a second 401 means something other than expiry
        self.executor.execute(&request, &new_token).await
    }
}
