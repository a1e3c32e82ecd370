// ============================================================================
// Back Office Infrastructure - PostgreSQL Audit Log Repository
// File: crates/backoffice-infrastructure/src/database/postgres/audit_log_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

use backoffice_core::domain::AuditLog;
use backoffice_core::error::DomainError;
use backoffice_core::repositories::AuditLogRepository;

/// Append-only: this adapter deliberately has no read or update path.
pub struct PgAuditLogRepository {
    pool: PgPool,
}

impl PgAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for PgAuditLogRepository {
    async fn append(&self, entry: &AuditLog) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO audit_logs (
                id, user_id, username, entity, entity_id,
                action, ip_address, user_agent, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(entry.id)
        .bind(entry.user_id)
        .bind(&entry.username)
        .bind(&entry.entity)
        .bind(entry.entity_id)
        .bind(entry.action.as_str())
        .bind(&entry.ip_address)
        .bind(&entry.user_agent)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error appending audit entry: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }
}
