//! Session entity correlating a refresh token to a login.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tg_shared::utils::validation::{
    cap_length, is_valid_ip, MAX_DEVICE_LENGTH, MAX_USER_AGENT_LENGTH,
};

use crate::errors::{DomainError, ValidationError};

/// Client metadata captured at login time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMeta {
    /// Client IP address (IPv4 or IPv6 literal)
    pub ip_address: Option<String>,

    /// Device description reported by the client
    pub device: Option<String>,

    /// User agent string
    pub user_agent: Option<String>,
}

/// Lifecycle state of a session
///
/// Only `Active` authorizes requests; `Expired` and `Invalidated` are
/// both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Active,
    Expired,
    Invalidated,
}

/// Server-side session record, one per successful login
///
/// The session carries its own `expires_at` clock, independent of the
/// JWT expiry claim, and an explicit `is_active` flag that logout flips.
/// The refresh token is stored hashed, never raw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for the session
    pub id: Uuid,

    /// Owning user identity
    pub user_id: String,

    /// SHA-256 hash of the refresh token issued with this session
    pub token_hash: String,

    /// Client IP address, if reported
    pub ip_address: Option<String>,

    /// Device description, if reported (length-capped)
    pub device: Option<String>,

    /// User agent string, if reported (length-capped)
    pub user_agent: Option<String>,

    /// Whether the session still authorizes refreshes
    pub is_active: bool,

    /// Timestamp when the session expires
    pub expires_at: DateTime<Utc>,

    /// Timestamp when the session was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last mutation
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Creates a new active session
    ///
    /// The IP address, when present, must be a valid IPv4/IPv6 literal;
    /// device and user agent strings are capped rather than rejected.
    pub fn new(
        user_id: &str,
        token_hash: String,
        meta: ClientMeta,
        ttl_seconds: i64,
    ) -> Result<Self, DomainError> {
        if user_id.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "user_id".to_string(),
            }
            .into());
        }
        if token_hash.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "token_hash".to_string(),
            }
            .into());
        }
        if let Some(ref ip) = meta.ip_address {
            if !is_valid_ip(ip) {
                return Err(ValidationError::InvalidFormat {
                    field: "ip_address".to_string(),
                }
                .into());
            }
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            token_hash,
            ip_address: meta.ip_address,
            device: meta.device.map(|d| cap_length(&d, MAX_DEVICE_LENGTH)),
            user_agent: meta.user_agent.map(|ua| cap_length(&ua, MAX_USER_AGENT_LENGTH)),
            is_active: true,
            expires_at: now + Duration::seconds(ttl_seconds),
            created_at: now,
            updated_at: now,
        })
    }

    /// Checks if the session has passed its expiry clock
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Effective lifecycle state
    ///
    /// A session past `expires_at` is `Expired` even if `is_active` is
    /// still true in storage; callers persist that correction lazily.
    pub fn state(&self) -> SessionState {
        if !self.is_active {
            SessionState::Invalidated
        } else if self.is_expired() {
            SessionState::Expired
        } else {
            SessionState::Active
        }
    }

    /// Whether this session currently authorizes a refresh
    pub fn is_authorizing(&self) -> bool {
        self.state() == SessionState::Active
    }

    /// Deactivates the session
    pub fn invalidate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> ClientMeta {
        ClientMeta {
            ip_address: Some("10.0.0.7".to_string()),
            device: Some("pixel-8".to_string()),
            user_agent: Some("tokengate-cli/0.1".to_string()),
        }
    }

    #[test]
    fn test_new_session_is_active() {
        let session = Session::new("u1", "hash".to_string(), meta(), 3600).unwrap();

        assert_eq!(session.user_id, "u1");
        assert!(session.is_active);
        assert!(!session.is_expired());
        assert_eq!(session.state(), SessionState::Active);
        assert!(session.is_authorizing());
    }

    #[test]
    fn test_rejects_invalid_ip() {
        let bad = ClientMeta {
            ip_address: Some("999.0.0.1".to_string()),
            ..Default::default()
        };
        let result = Session::new("u1", "hash".to_string(), bad, 3600);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_missing_required_fields() {
        assert!(Session::new("", "hash".to_string(), ClientMeta::default(), 60).is_err());
        assert!(Session::new("u1", String::new(), ClientMeta::default(), 60).is_err());
    }

    #[test]
    fn test_user_agent_is_capped() {
        let long_ua = "x".repeat(MAX_USER_AGENT_LENGTH + 100);
        let m = ClientMeta {
            user_agent: Some(long_ua),
            ..Default::default()
        };
        let session = Session::new("u1", "hash".to_string(), m, 60).unwrap();
        assert_eq!(session.user_agent.unwrap().len(), MAX_USER_AGENT_LENGTH);
    }

    #[test]
    fn test_expired_session_is_not_authorizing() {
        let mut session = Session::new("u1", "hash".to_string(), ClientMeta::default(), 3600).unwrap();
        session.expires_at = Utc::now() - Duration::days(1);

        // is_active is still true in storage, but the state view wins
        assert!(session.is_active);
        assert_eq!(session.state(), SessionState::Expired);
        assert!(!session.is_authorizing());
    }

    #[test]
    fn test_invalidate_is_terminal() {
        let mut session = Session::new("u1", "hash".to_string(), ClientMeta::default(), 3600).unwrap();
        session.invalidate();

        assert!(!session.is_active);
        assert_eq!(session.state(), SessionState::Invalidated);
        assert!(!session.is_authorizing());
    }
}
