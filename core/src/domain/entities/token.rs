//! Token entities for JWT-based authentication.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT issuer
pub const JWT_ISSUER: &str = "tokengate";

/// JWT audience
pub const JWT_AUDIENCE: &str = "tokengate-api";

/// Role assigned when the identity provider supplies none
pub const DEFAULT_ROLE: &str = "user";

/// Token class, determining which secret signs and verifies a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenClass {
    /// Short-lived bearer credential sent on every authenticated request
    Access,
    /// Longer-lived credential exchanged only for new access tokens
    Refresh,
}

impl TokenClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenClass::Access => "access",
            TokenClass::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims structure for JWT payload
///
/// The claim shape is fixed: `sub` and `role` are the only identity
/// claims verifiers may act on. Anything else goes into the reserved
/// `meta` map so issuer and verifier cannot drift apart silently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Role granted to the subject
    pub role: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// Token class this JWT was signed for
    pub cls: TokenClass,

    /// Reserved extensible metadata map
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub meta: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Creates new claims for the given class and lifetime
    pub fn new(subject: &str, role: &str, class: TokenClass, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(ttl_seconds);
        let role = if role.is_empty() { DEFAULT_ROLE } else { role };

        Self {
            sub: subject.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
            cls: class,
            meta: HashMap::new(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }

    /// Checks if the claims are currently valid (after nbf, before exp)
    pub fn is_valid(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.nbf && now < self.exp
    }

    /// Remaining lifetime in whole seconds, zero once expired
    pub fn seconds_until_expiry(&self) -> i64 {
        (self.exp - Utc::now().timestamp()).max(0)
    }
}

/// Token pair returned to the client after login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair with the configured expiry windows
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_claims() {
        let claims = Claims::new("u1", "admin", TokenClass::Access, 3600);

        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.cls, TokenClass::Access);
        assert_eq!(claims.iss, JWT_ISSUER);
        assert_eq!(claims.aud, JWT_AUDIENCE);
        assert!(claims.is_valid());
        assert!(!claims.is_expired());
        assert!(claims.seconds_until_expiry() > 3500);
    }

    #[test]
    fn test_empty_role_defaults_to_user() {
        let claims = Claims::new("u1", "", TokenClass::Refresh, 60);
        assert_eq!(claims.role, DEFAULT_ROLE);
    }

    #[test]
    fn test_claims_expiration() {
        let mut claims = Claims::new("u1", "user", TokenClass::Access, 3600);
        claims.exp = Utc::now().timestamp() - 1;

        assert!(claims.is_expired());
        assert!(!claims.is_valid());
        assert_eq!(claims.seconds_until_expiry(), 0);
    }

    #[test]
    fn test_claims_not_before() {
        let mut claims = Claims::new("u1", "user", TokenClass::Access, 3600);
        claims.nbf = Utc::now().timestamp() + 3600;

        assert!(!claims.is_valid());
    }

    #[test]
    fn test_claims_serialization_roundtrip() {
        let mut claims = Claims::new("u1", "user", TokenClass::Refresh, 60);
        claims
            .meta
            .insert("tenant".to_string(), serde_json::json!("acme"));

        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains("\"cls\":\"refresh\""));

        let decoded: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(claims, decoded);
    }

    #[test]
    fn test_empty_meta_not_serialized() {
        let claims = Claims::new("u1", "user", TokenClass::Access, 60);
        let json = serde_json::to_string(&claims).unwrap();
        assert!(!json.contains("meta"));
    }

    #[test]
    fn test_token_pair_creation() {
        let pair = TokenPair::new("a".to_string(), "r".to_string(), 3600, 604_800);
        assert_eq!(pair.access_expires_in, 3600);
        assert_eq!(pair.refresh_expires_in, 604_800);
    }
}
