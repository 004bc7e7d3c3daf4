//! Configuration for the token codec

use tg_shared::config::TokenConfig;

use crate::errors::{ConfigError, DomainError};

/// Configuration for the token codec
#[derive(Debug, Clone)]
pub struct TokenCodecConfig {
    /// Signing secret for the access token class
    pub access_secret: String,
    /// Signing secret for the refresh token class
    pub refresh_secret: String,
    /// Access token expiry in seconds
    pub access_ttl_seconds: i64,
    /// Refresh token expiry in seconds
    pub refresh_ttl_seconds: i64,
    /// JWT issuer claim
    pub issuer: String,
    /// JWT audience claim
    pub audience: String,
}

impl Default for TokenCodecConfig {
    fn default() -> Self {
        Self {
            access_secret: "development-access-secret-change-in-production".to_string(),
            refresh_secret: "development-refresh-secret-change-in-production".to_string(),
            access_ttl_seconds: 3600,
            refresh_ttl_seconds: 604_800,
            issuer: "tokengate".to_string(),
            audience: "tokengate-api".to_string(),
        }
    }
}

impl TokenCodecConfig {
    /// Build codec configuration from the shared token configuration
    ///
    /// Fails with a configuration error when either class secret is
    /// absent, so a misconfigured deployment stops at first use rather
    /// than silently issuing unverifiable tokens.
    pub fn from_token_config(config: &TokenConfig) -> Result<Self, DomainError> {
        let access_secret = require_secret(&config.access_secret, "ACCESS_TOKEN_SECRET")?;
        let refresh_secret = require_secret(&config.refresh_secret, "REFRESH_TOKEN_SECRET")?;

        Ok(Self {
            access_secret,
            refresh_secret,
            access_ttl_seconds: config.access_ttl_seconds,
            refresh_ttl_seconds: config.refresh_ttl_seconds,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        })
    }
}

fn require_secret(value: &Option<String>, name: &str) -> Result<String, DomainError> {
    match value {
        Some(secret) if !secret.is_empty() => Ok(secret.clone()),
        _ => Err(ConfigError::MissingSecret {
            name: name.to_string(),
        }
        .into()),
    }
}
