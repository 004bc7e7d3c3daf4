//! Configuration for the authentication service

use tg_shared::config::TokenConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Whether verification consults the revocation store
    pub revocation_enabled: bool,

    /// Allow access-token checks to pass when the revocation store is
    /// unreachable. Refresh checks always fail closed regardless.
    pub degraded_allow_access: bool,

    /// Session lifetime in seconds (independent of the JWT expiry)
    pub session_ttl_seconds: i64,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            revocation_enabled: true,
            degraded_allow_access: false,
            session_ttl_seconds: 604_800,
        }
    }
}

impl AuthServiceConfig {
    /// Derive service configuration from the shared token configuration
    ///
    /// The session clock follows the refresh-token window: a session
    /// outliving its refresh token could never be used anyway.
    pub fn from_token_config(config: &TokenConfig) -> Self {
        Self {
            revocation_enabled: config.revocation_enabled,
            degraded_allow_access: config.degraded_allow_access,
            session_ttl_seconds: config.refresh_ttl_seconds,
        }
    }
}
