//! Main authentication service implementation

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::{debug, error, info, warn};

use crate::domain::entities::session::{ClientMeta, Session, SessionState};
use crate::domain::entities::token::{Claims, TokenPair};
use crate::domain::value_objects::{AuthenticatedUser, LoginResponse};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{RevocationStore, SessionRepository};
use crate::services::token::TokenCodec;

use super::config::AuthServiceConfig;

/// Authentication service orchestrating tokens, sessions, and revocation
///
/// All dependencies are injected at construction; there is no ambient
/// state. Every operation is an independent, stateless call safe to run
/// from any number of concurrent tasks: shared mutable state lives in
/// the injected stores, which provide their own single-row atomicity.
pub struct AuthService<S, R>
where
    S: SessionRepository,
    R: RevocationStore,
{
    /// Session repository for login records
    sessions: Arc<S>,
    /// Revocation store consulted at verification time
    revocations: Arc<R>,
    /// Codec signing and verifying both token classes
    codec: Arc<TokenCodec>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<S, R> AuthService<S, R>
where
    S: SessionRepository,
    R: RevocationStore,
{
    /// Create a new authentication service
    pub fn new(
        sessions: Arc<S>,
        revocations: Arc<R>,
        codec: Arc<TokenCodec>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            sessions,
            revocations,
            codec,
            config,
        }
    }

    /// Hashes a token for session correlation
    ///
    /// Sessions store this hash, never the raw token.
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Log a user in: issue a token pair and create its session record
    ///
    /// The caller has already established identity (password or OTP
    /// verification is outside this subsystem) and supplies the subject
    /// and role. One session row is created per call, correlated to the
    /// refresh token by hash.
    pub async fn login(
        &self,
        subject: &str,
        role: &str,
        client_meta: ClientMeta,
    ) -> DomainResult<LoginResponse> {
        let access_token = self.codec.issue_access_token(subject, role)?;
        let refresh_token = self.codec.issue_refresh_token(subject, role)?;

        let session = Session::new(
            subject,
            Self::hash_token(&refresh_token),
            client_meta,
            self.config.session_ttl_seconds,
        )?;
        let session = self.sessions.create(session).await?;

        info!(subject = %subject, session_id = %session.id, "user logged in");

        let pair = TokenPair::new(
            access_token,
            refresh_token,
            self.codec.access_ttl_seconds(),
            self.codec.refresh_ttl_seconds(),
        );
        Ok(LoginResponse::from_token_pair(pair, session.id))
    }

    /// Verify an access token and return the authenticated identity
    ///
    /// Consults the revocation store for the token's jti and for a
    /// blanket subject revocation, but not the session store: access
    /// tokens are short-lived, so the staleness window is bounded by
    /// the access TTL.
    pub async fn authenticate(&self, access_token: &str) -> DomainResult<AuthenticatedUser> {
        let claims = self.codec.verify_access_token(access_token)?;
        self.check_revocation(&claims, self.config.degraded_allow_access)
            .await?;

        Ok(AuthenticatedUser {
            subject: claims.sub,
            role: claims.role,
        })
    }

    /// Exchange a valid refresh token for a new access token
    ///
    /// The refresh token must verify, must not be revoked (fail closed
    /// on store outage), and its session must still be ACTIVE. The
    /// refresh token itself is not rotated.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<String> {
        let claims = self.codec.verify_refresh_token(refresh_token)?;
        self.check_revocation(&claims, false).await?;

        let token_hash = Self::hash_token(refresh_token);
        let session = self
            .sessions
            .find_by_token_hash(&token_hash)
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        // Lazily persist the expiry correction so storage catches up
        // with the state the read path already enforces.
        if session.is_active && session.is_expired() {
            if let Err(e) = self.sessions.invalidate(session.id).await {
                warn!(session_id = %session.id, error = %e, "failed to persist session expiry");
            }
        }

        match session.state() {
            SessionState::Active => {
                debug!(subject = %claims.sub, session_id = %session.id, "access token refreshed");
                self.codec.issue_access_token(&claims.sub, &claims.role)
            }
            SessionState::Expired => Err(AuthError::SessionExpired.into()),
            SessionState::Invalidated => Err(AuthError::SessionInvalidated.into()),
        }
    }

    /// Log out the session behind a refresh token
    ///
    /// Invalidates the session record and revokes the refresh token's
    /// jti for its remaining lifetime, so a captured-but-unused refresh
    /// token cannot be replayed after logout even though its signature
    /// stays valid until natural expiry. Missing sessions are ignored:
    /// logging out twice succeeds.
    pub async fn logout(&self, refresh_token: &str) -> DomainResult<()> {
        let claims = self.codec.verify_refresh_token(refresh_token)?;

        let token_hash = Self::hash_token(refresh_token);
        match self.sessions.find_by_token_hash(&token_hash).await? {
            Some(session) => {
                self.sessions.invalidate(session.id).await?;
                info!(subject = %claims.sub, session_id = %session.id, "session logged out");
            }
            None => {
                debug!(subject = %claims.sub, "logout for unknown session");
            }
        }

        let ttl = claims.seconds_until_expiry() as u64;
        self.revocations.revoke_token(&claims.jti, ttl).await?;

        Ok(())
    }

    /// Log a subject out everywhere
    ///
    /// Invalidates every active session for the subject and records a
    /// blanket revocation with TTL equal to the refresh window, so
    /// already-issued access tokens stop authorizing within at most one
    /// access-token TTL.
    pub async fn logout_all(&self, subject: &str) -> DomainResult<usize> {
        let count = self.sessions.invalidate_all_for_user(subject).await?;
        self.revocations
            .revoke_subject(subject, self.codec.refresh_ttl_seconds() as u64)
            .await?;

        info!(subject = %subject, sessions = count, "subject logged out everywhere");
        Ok(count)
    }

    /// Consult the revocation store for the token's jti and subject
    ///
    /// `fail_open` applies only to store outages and only on the access
    /// path under explicit degraded-mode configuration; a genuine
    /// revocation hit always denies.
    async fn check_revocation(&self, claims: &Claims, fail_open: bool) -> DomainResult<()> {
        if !self.config.revocation_enabled {
            debug!("revocation store disabled; skipping check");
            return Ok(());
        }

        let token_hit = match self.revocations.is_token_revoked(&claims.jti).await {
            Ok(hit) => hit,
            Err(e) => return self.handle_store_outage(e, fail_open),
        };
        if token_hit {
            return Err(AuthError::TokenRevoked.into());
        }

        let subject_hit = match self.revocations.is_subject_revoked(&claims.sub).await {
            Ok(hit) => hit,
            Err(e) => return self.handle_store_outage(e, fail_open),
        };
        if subject_hit {
            return Err(AuthError::TokenRevoked.into());
        }

        Ok(())
    }

    /// Apply the fail-closed policy to a store outage
    ///
    /// Logged distinctly from genuine auth failures so operators can
    /// tell an outage from an attack.
    fn handle_store_outage(&self, e: DomainError, fail_open: bool) -> DomainResult<()> {
        if fail_open {
            error!(error = %e, "revocation store unavailable; degraded mode allows access");
            Ok(())
        } else {
            error!(error = %e, "revocation store unavailable; failing closed");
            Err(AuthError::Unauthorized.into())
        }
    }
}
