// ============================================================================
// Back Office Infrastructure - PostgreSQL Refresh Token Repository
// File: crates/backoffice-infrastructure/src/database/postgres/refresh_token_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use backoffice_core::domain::RefreshToken;
use backoffice_core::error::DomainError;
use backoffice_core::repositories::RefreshTokenRepository;

pub struct PgRefreshTokenRepository {
    pool: PgPool,
}

impl PgRefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RefreshTokenRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
}

impl From<RefreshTokenRow> for RefreshToken {
    fn from(row: RefreshTokenRow) -> Self {
        RefreshToken {
            id: row.id,
            user_id: row.user_id,
            token: row.token,
            created_at: row.created_at,
            expires_at: row.expires_at,
            revoked: row.revoked,
        }
    }
}

#[async_trait]
impl RefreshTokenRepository for PgRefreshTokenRepository {
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, DomainError> {
        let row: Option<RefreshTokenRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, token, created_at, expires_at, revoked
            FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding refresh token: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, token: &RefreshToken) -> Result<RefreshToken, DomainError> {
        let row: RefreshTokenRow = sqlx::query_as(
            r#"
            INSERT INTO refresh_tokens (id, user_id, token, created_at, expires_at, revoked)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, token, created_at, expires_at, revoked
            "#,
        )
        .bind(token.id)
        .bind(token.user_id)
        .bind(&token.token)
        .bind(token.created_at)
        .bind(token.expires_at)
        .bind(token.revoked)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating refresh token: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    // The conditional update is the whole point: only one caller ever
    // observes rows_affected == 1 for a given token value.
    async fn claim(&self, token: &str) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked = TRUE
            WHERE token = $1 AND revoked = FALSE
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error claiming refresh token: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(result.rows_affected() == 1)
    }

    async fn revoke_all_for_user(&self, user_id: &Uuid) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked = TRUE
            WHERE user_id = $1 AND revoked = FALSE
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error revoking tokens for user: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(result.rows_affected())
    }
}
