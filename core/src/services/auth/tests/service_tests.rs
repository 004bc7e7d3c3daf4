//! Unit tests for the authentication service

use std::sync::Arc;

use crate::domain::entities::session::ClientMeta;
use crate::errors::{AuthError, DomainError};
use crate::repositories::{
    MockRevocationStore, MockSessionRepository, RevocationStore, SessionRepository,
};
use crate::services::auth::{AuthService, AuthServiceConfig};
use crate::services::token::{TokenCodec, TokenCodecConfig};

type TestService = AuthService<MockSessionRepository, MockRevocationStore>;

struct Fixture {
    service: TestService,
    sessions: Arc<MockSessionRepository>,
    revocations: Arc<MockRevocationStore>,
    codec: Arc<TokenCodec>,
}

fn fixture() -> Fixture {
    fixture_with(AuthServiceConfig::default())
}

fn fixture_with(config: AuthServiceConfig) -> Fixture {
    let sessions = Arc::new(MockSessionRepository::new());
    let revocations = Arc::new(MockRevocationStore::new());
    let codec =
        Arc::new(TokenCodec::new(TokenCodecConfig::default()).expect("Failed to create codec"));
    let service = AuthService::new(
        sessions.clone(),
        revocations.clone(),
        codec.clone(),
        config,
    );
    Fixture {
        service,
        sessions,
        revocations,
        codec,
    }
}

fn meta() -> ClientMeta {
    ClientMeta {
        ip_address: Some("192.168.1.20".to_string()),
        device: Some("macbook".to_string()),
        user_agent: Some("tokengate-cli/0.1".to_string()),
    }
}

#[tokio::test]
async fn test_login_issues_tokens_and_creates_session() {
    let f = fixture();

    let response = f.service.login("u1", "user", meta()).await.unwrap();

    assert!(!response.access_token.is_empty());
    assert!(!response.refresh_token.is_empty());
    assert_ne!(response.access_token, response.refresh_token);

    let session = f
        .sessions
        .find_by_id(response.session_id)
        .await
        .unwrap()
        .expect("session should exist");
    assert_eq!(session.user_id, "u1");
    assert!(session.is_active);
    assert_eq!(
        session.token_hash,
        TestService::hash_token(&response.refresh_token)
    );
    // The raw token never lands in storage
    assert_ne!(session.token_hash, response.refresh_token);
}

#[tokio::test]
async fn test_authenticate_round_trip() {
    let f = fixture();

    let response = f.service.login("u1", "admin", meta()).await.unwrap();
    let user = f.service.authenticate(&response.access_token).await.unwrap();

    assert_eq!(user.subject, "u1");
    assert_eq!(user.role, "admin");
}

#[tokio::test]
async fn test_authenticate_rejects_refresh_token() {
    let f = fixture();

    let response = f.service.login("u1", "user", meta()).await.unwrap();
    let err = f
        .service
        .authenticate(&response.refresh_token)
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Token(_)));
}

#[tokio::test]
async fn test_authenticate_rejects_revoked_token() {
    let f = fixture();

    let response = f.service.login("u1", "user", meta()).await.unwrap();
    let claims = f.codec.decode(&response.access_token).unwrap();
    f.revocations.revoke_token(&claims.jti, 3600).await.unwrap();

    let err = f
        .service
        .authenticate(&response.access_token)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::TokenRevoked)));
}

#[tokio::test]
async fn test_refresh_returns_new_access_token() {
    let f = fixture();

    let response = f.service.login("u1", "user", meta()).await.unwrap();
    let new_access = f.service.refresh(&response.refresh_token).await.unwrap();

    let user = f.service.authenticate(&new_access).await.unwrap();
    assert_eq!(user.subject, "u1");
    assert_eq!(user.role, "user");
}

#[tokio::test]
async fn test_refresh_unknown_token_is_session_not_found() {
    let f = fixture();

    // A validly signed refresh token with no session behind it
    let orphan = f.codec.issue_refresh_token("u1", "user").unwrap();
    let err = f.service.refresh(&orphan).await.unwrap_err();

    assert!(matches!(err, DomainError::Auth(AuthError::SessionNotFound)));
}

#[tokio::test]
async fn test_refresh_after_logout_is_rejected() {
    let f = fixture();

    let response = f.service.login("u1", "user", meta()).await.unwrap();
    f.service.logout(&response.refresh_token).await.unwrap();

    // The jti revocation fires before the session lookup
    let err = f.service.refresh(&response.refresh_token).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::TokenRevoked)));
}

#[tokio::test]
async fn test_refresh_after_logout_all_is_rejected() {
    let f = fixture();

    let response = f.service.login("u1", "user", meta()).await.unwrap();
    f.service.logout_all("u1").await.unwrap();

    let err = f.service.refresh(&response.refresh_token).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::TokenRevoked)));
}

#[tokio::test]
async fn test_refresh_with_expired_session_persists_correction() {
    let f = fixture_with(AuthServiceConfig {
        // Session clock already in the past at login time
        session_ttl_seconds: -60,
        ..Default::default()
    });

    let response = f.service.login("u1", "user", meta()).await.unwrap();
    let err = f.service.refresh(&response.refresh_token).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::SessionExpired)));

    // Lazy correction made it to storage
    let session = f
        .sessions
        .find_by_id(response.session_id)
        .await
        .unwrap()
        .unwrap();
    assert!(!session.is_active);
}

#[tokio::test]
async fn test_refresh_with_invalidated_session_is_rejected() {
    let f = fixture();

    let response = f.service.login("u1", "user", meta()).await.unwrap();
    f.sessions.invalidate(response.session_id).await.unwrap();

    let err = f.service.refresh(&response.refresh_token).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::SessionInvalidated)
    ));
}

#[tokio::test]
async fn test_refresh_fails_closed_on_store_outage() {
    let f = fixture();

    let response = f.service.login("u1", "user", meta()).await.unwrap();
    f.revocations.set_unavailable(true);

    let err = f.service.refresh(&response.refresh_token).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::Unauthorized)));
}

#[tokio::test]
async fn test_authenticate_fails_closed_on_store_outage_by_default() {
    let f = fixture();

    let response = f.service.login("u1", "user", meta()).await.unwrap();
    f.revocations.set_unavailable(true);

    let err = f
        .service
        .authenticate(&response.access_token)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::Unauthorized)));
}

#[tokio::test]
async fn test_degraded_mode_allows_access_path_only() {
    let f = fixture_with(AuthServiceConfig {
        degraded_allow_access: true,
        ..Default::default()
    });

    let response = f.service.login("u1", "user", meta()).await.unwrap();
    f.revocations.set_unavailable(true);

    // Access path proceeds under degraded mode
    let user = f.service.authenticate(&response.access_token).await.unwrap();
    assert_eq!(user.subject, "u1");

    // Refresh path still fails closed
    let err = f.service.refresh(&response.refresh_token).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::Unauthorized)));
}

#[tokio::test]
async fn test_revocation_disabled_skips_store_entirely() {
    let f = fixture_with(AuthServiceConfig {
        revocation_enabled: false,
        ..Default::default()
    });

    let response = f.service.login("u1", "user", meta()).await.unwrap();
    f.revocations.set_unavailable(true);

    // Neither path touches the store when revocation is disabled
    assert!(f.service.authenticate(&response.access_token).await.is_ok());
    assert!(f.service.refresh(&response.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_logout_invalidates_session_and_revokes_jti() {
    let f = fixture();

    let response = f.service.login("u1", "user", meta()).await.unwrap();
    f.service.logout(&response.refresh_token).await.unwrap();

    let session = f
        .sessions
        .find_by_id(response.session_id)
        .await
        .unwrap()
        .unwrap();
    assert!(!session.is_active);

    let claims = f.codec.decode(&response.refresh_token).unwrap();
    assert!(f.revocations.is_token_revoked(&claims.jti).await.unwrap());
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let f = fixture();

    let response = f.service.login("u1", "user", meta()).await.unwrap();
    f.service.logout(&response.refresh_token).await.unwrap();
    // Second logout finds no active session but still succeeds
    f.service.logout(&response.refresh_token).await.unwrap();
}

#[tokio::test]
async fn test_logout_with_no_session_succeeds() {
    let f = fixture();

    let orphan = f.codec.issue_refresh_token("u1", "user").unwrap();
    f.service.logout(&orphan).await.unwrap();
}

#[tokio::test]
async fn test_logout_rejects_access_token() {
    let f = fixture();

    let response = f.service.login("u1", "user", meta()).await.unwrap();
    let err = f.service.logout(&response.access_token).await.unwrap_err();
    assert!(matches!(err, DomainError::Token(_)));
}

#[tokio::test]
async fn test_logout_all_counts_sessions_and_revokes_subject() {
    let f = fixture();

    let r1 = f.service.login("u1", "user", meta()).await.unwrap();
    let r2 = f.service.login("u1", "user", ClientMeta::default()).await.unwrap();
    let other = f.service.login("u2", "user", ClientMeta::default()).await.unwrap();

    let count = f.service.logout_all("u1").await.unwrap();
    assert_eq!(count, 2);

    assert!(f.revocations.is_subject_revoked("u1").await.unwrap());

    // Even unexpired access tokens stop authorizing
    let err = f.service.authenticate(&r1.access_token).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::TokenRevoked)));
    let err = f.service.authenticate(&r2.access_token).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::TokenRevoked)));

    // Other subjects are untouched
    assert!(f.service.authenticate(&other.access_token).await.is_ok());
    assert!(f.service.refresh(&other.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_logout_all_with_no_sessions_returns_zero() {
    let f = fixture();
    let count = f.service.logout_all("nobody").await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_hash_token_is_deterministic() {
    let a = TestService::hash_token("some-token");
    let b = TestService::hash_token("some-token");
    let c = TestService::hash_token("other-token");

    assert_eq!(a, b);
    assert_ne!(a, c);
    // SHA-256 hex digest
    assert_eq!(a.len(), 64);
}
