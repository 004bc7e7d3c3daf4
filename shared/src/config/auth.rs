//! Token signing and revocation policy configuration

use serde::{Deserialize, Serialize};

use crate::config::Environment;
use crate::utils::duration;

/// Default access token lifetime ("1h")
pub const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: i64 = 3600;

/// Default refresh token lifetime ("7d")
pub const DEFAULT_REFRESH_TOKEN_TTL_SECONDS: i64 = 604_800;

/// Token issuance and verification configuration
///
/// Access and refresh tokens are signed with independent secrets so a
/// leaked access token cannot be used to forge a refresh token.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Secret for the access token class (`ACCESS_TOKEN_SECRET`)
    pub access_secret: Option<String>,

    /// Secret for the refresh token class (`REFRESH_TOKEN_SECRET`)
    pub refresh_secret: Option<String>,

    /// Access token expiry time in seconds
    pub access_ttl_seconds: i64,

    /// Refresh token expiry time in seconds
    pub refresh_ttl_seconds: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,

    /// Whether verification consults the revocation store
    #[serde(default = "default_revocation_enabled")]
    pub revocation_enabled: bool,

    /// Allow access-token verification to fail open when the revocation
    /// store is unreachable. Refresh verification always fails closed.
    #[serde(default)]
    pub degraded_allow_access: bool,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            access_secret: None,
            refresh_secret: None,
            access_ttl_seconds: DEFAULT_ACCESS_TOKEN_TTL_SECONDS,
            refresh_ttl_seconds: DEFAULT_REFRESH_TOKEN_TTL_SECONDS,
            issuer: String::from("tokengate"),
            audience: String::from("tokengate-api"),
            revocation_enabled: default_revocation_enabled(),
            degraded_allow_access: false,
        }
    }
}

impl TokenConfig {
    /// Create configuration from environment variables
    ///
    /// Recognized variables: `ACCESS_TOKEN_SECRET`, `REFRESH_TOKEN_SECRET`,
    /// `ACCESS_TOKEN_TTL` (duration string, default "1h"),
    /// `REFRESH_TOKEN_TTL` (default "7d"), `REVOCATION_STORE_ENABLED`,
    /// `AUTH_DEGRADED_ALLOW_ACCESS`.
    pub fn from_env() -> Self {
        let access_secret = std::env::var("ACCESS_TOKEN_SECRET").ok();
        let refresh_secret = std::env::var("REFRESH_TOKEN_SECRET").ok();

        let access_ttl_seconds = std::env::var("ACCESS_TOKEN_TTL")
            .ok()
            .and_then(|v| duration::parse(&v).ok())
            .unwrap_or(DEFAULT_ACCESS_TOKEN_TTL_SECONDS);
        let refresh_ttl_seconds = std::env::var("REFRESH_TOKEN_TTL")
            .ok()
            .and_then(|v| duration::parse(&v).ok())
            .unwrap_or(DEFAULT_REFRESH_TOKEN_TTL_SECONDS);

        Self {
            access_secret,
            refresh_secret,
            access_ttl_seconds,
            refresh_ttl_seconds,
            revocation_enabled: env_bool("REVOCATION_STORE_ENABLED", default_revocation_enabled()),
            degraded_allow_access: env_bool("AUTH_DEGRADED_ALLOW_ACCESS", false),
            ..Default::default()
        }
    }

    /// Set both class secrets
    pub fn with_secrets(
        mut self,
        access_secret: impl Into<String>,
        refresh_secret: impl Into<String>,
    ) -> Self {
        self.access_secret = Some(access_secret.into());
        self.refresh_secret = Some(refresh_secret.into());
        self
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_ttl_seconds = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_ttl_seconds = days * 86400;
        self
    }

    /// Check that required secrets are present for the given environment
    ///
    /// Production and staging refuse to run without both secrets; in
    /// development missing secrets are reported lazily on first use.
    pub fn validate_for(&self, env: Environment) -> Result<(), String> {
        if env.is_development() {
            return Ok(());
        }
        if self.access_secret.as_deref().unwrap_or("").is_empty() {
            return Err("ACCESS_TOKEN_SECRET is not set".to_string());
        }
        if self.refresh_secret.as_deref().unwrap_or("").is_empty() {
            return Err("REFRESH_TOKEN_SECRET is not set".to_string());
        }
        Ok(())
    }
}

fn default_revocation_enabled() -> bool {
    true
}

fn env_bool(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(v) => matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}
