//! MySQL implementation of the SessionRepository trait.
//!
//! Persists session records with SQLx. The `sessions` table stores one
//! row per login; `token_hash` is unique and indexed so the refresh
//! path resolves in one lookup.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE sessions (
//!     id          CHAR(36)     PRIMARY KEY,
//!     user_id     VARCHAR(255) NOT NULL,
//!     token_hash  CHAR(64)     NOT NULL UNIQUE,
//!     ip_address  VARCHAR(45),
//!     device      VARCHAR(128),
//!     user_agent  VARCHAR(512),
//!     is_active   BOOLEAN      NOT NULL DEFAULT TRUE,
//!     expires_at  TIMESTAMP    NOT NULL,
//!     created_at  TIMESTAMP    NOT NULL,
//!     updated_at  TIMESTAMP    NOT NULL,
//!     INDEX idx_sessions_user_id (user_id),
//!     INDEX idx_sessions_expires_at (expires_at)
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use tg_core::domain::entities::session::Session;
use tg_core::errors::{DomainError, StoreError, ValidationError};
use tg_core::repositories::SessionRepository;

/// Classify a query failure for the domain layer
///
/// Connection-level failures become `StoreError::Unavailable` so the
/// fail-closed policy applies; anything else (bad data, broken query)
/// stays an internal error.
fn map_query_error(context: &str, e: sqlx::Error) -> DomainError {
    match e {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StoreError::Unavailable {
            message: format!("{}: {}", context, e),
        }
        .into(),
        _ => DomainError::Internal {
            message: format!("{}: {}", context, e),
        },
    }
}

/// MySQL implementation of SessionRepository
pub struct MySqlSessionRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlSessionRepository {
    /// Create a new MySQL session repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Session entity
    fn row_to_session(row: &sqlx::mysql::MySqlRow) -> Result<Session, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        Ok(Session {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid session UUID: {}", e),
            })?,
            user_id: row.try_get("user_id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get user_id: {}", e),
            })?,
            token_hash: row.try_get("token_hash").map_err(|e| DomainError::Internal {
                message: format!("Failed to get token_hash: {}", e),
            })?,
            ip_address: row.try_get("ip_address").map_err(|e| DomainError::Internal {
                message: format!("Failed to get ip_address: {}", e),
            })?,
            device: row.try_get("device").map_err(|e| DomainError::Internal {
                message: format!("Failed to get device: {}", e),
            })?,
            user_agent: row.try_get("user_agent").map_err(|e| DomainError::Internal {
                message: format!("Failed to get user_agent: {}", e),
            })?,
            is_active: row.try_get("is_active").map_err(|e| DomainError::Internal {
                message: format!("Failed to get is_active: {}", e),
            })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl SessionRepository for MySqlSessionRepository {
    async fn create(&self, session: Session) -> Result<Session, DomainError> {
        let check_query = "SELECT EXISTS(SELECT 1 FROM sessions WHERE token_hash = ?) as hash_taken";
        let exists_row = sqlx::query(check_query)
            .bind(&session.token_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_query_error("Failed to check session existence", e))?;

        let taken: i8 = exists_row.try_get("hash_taken").map_err(|e| DomainError::Internal {
            message: format!("Failed to get existence result: {}", e),
        })?;

        if taken == 1 {
            return Err(ValidationError::DuplicateValue {
                field: "token_hash".to_string(),
            }
            .into());
        }

        let query = r#"
            INSERT INTO sessions (
                id, user_id, token_hash, ip_address, device, user_agent,
                is_active, expires_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(session.id.to_string())
            .bind(&session.user_id)
            .bind(&session.token_hash)
            .bind(&session.ip_address)
            .bind(&session.device)
            .bind(&session.user_agent)
            .bind(session.is_active)
            .bind(session.expires_at)
            .bind(session.created_at)
            .bind(session.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_query_error("Failed to save session", e))?;

        Ok(session)
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, DomainError> {
        let query = r#"
            SELECT id, user_id, token_hash, ip_address, device, user_agent,
                   is_active, expires_at, created_at, updated_at
            FROM sessions
            WHERE token_hash = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_query_error("Failed to find session by token hash", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_session(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Session>, DomainError> {
        let query = r#"
            SELECT id, user_id, token_hash, ip_address, device, user_agent,
                   is_active, expires_at, created_at, updated_at
            FROM sessions
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_query_error("Failed to find session by id", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_session(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Session>, DomainError> {
        let query = r#"
            SELECT id, user_id, token_hash, ip_address, device, user_agent,
                   is_active, expires_at, created_at, updated_at
            FROM sessions
            WHERE user_id = ?
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_query_error("Failed to find user sessions", e))?;

        let mut sessions = Vec::new();
        for row in rows {
            sessions.push(Self::row_to_session(&row)?);
        }

        Ok(sessions)
    }

    async fn invalidate(&self, id: Uuid) -> Result<bool, DomainError> {
        // Single-row atomic update; the is_active guard makes it idempotent
        let query = r#"
            UPDATE sessions
            SET is_active = FALSE, updated_at = ?
            WHERE id = ? AND is_active = TRUE
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_query_error("Failed to invalidate session", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn invalidate_all_for_user(&self, user_id: &str) -> Result<usize, DomainError> {
        let query = r#"
            UPDATE sessions
            SET is_active = FALSE, updated_at = ?
            WHERE user_id = ? AND is_active = TRUE
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_query_error("Failed to invalidate user sessions", e))?;

        Ok(result.rows_affected() as usize)
    }

    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        let query = "DELETE FROM sessions WHERE expires_at < ?";

        let result = sqlx::query(query)
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| map_query_error("Failed to delete expired sessions", e))?;

        Ok(result.rows_affected() as usize)
    }
}
