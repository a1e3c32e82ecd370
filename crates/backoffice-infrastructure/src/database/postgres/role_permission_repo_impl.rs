// ============================================================================
// Back Office Infrastructure - PostgreSQL Role/Permission Repository
// File: crates/backoffice-infrastructure/src/database/postgres/role_permission_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use backoffice_core::domain::{Permission, PermissionAction};
use backoffice_core::error::DomainError;
use backoffice_core::repositories::RolePermissionRepository;

pub struct PgRolePermissionRepository {
    pool: PgPool,
}

impl PgRolePermissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PermissionRow {
    pub id: Uuid,
    pub entity: String,
    pub action: String,
    pub condition: Option<String>,
    pub description: Option<String>,
}

impl TryFrom<PermissionRow> for Permission {
    type Error = DomainError;

    fn try_from(row: PermissionRow) -> Result<Self, Self::Error> {
        let action: PermissionAction = row.action.parse()?;
        Ok(Permission {
            id: row.id,
            entity: row.entity,
            action,
            condition: row.condition,
            description: row.description,
        })
    }
}

#[async_trait]
impl RolePermissionRepository for PgRolePermissionRepository {
    async fn role_names_for_user(&self, user_id: &Uuid) -> Result<Vec<String>, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT r.name
            FROM roles r
            JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = $1
            ORDER BY r.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error resolving roles for user: {}", e);
            DomainError::DatabaseError(e.to_string())
        })
    }

    async fn permissions_for_user(&self, user_id: &Uuid) -> Result<Vec<Permission>, DomainError> {
        let rows: Vec<PermissionRow> = sqlx::query_as(
            r#"
            SELECT DISTINCT p.id, p.entity, p.action, p.condition, p.description
            FROM permissions p
            JOIN role_permissions rp ON rp.permission_id = p.id
            JOIN user_roles ur ON ur.role_id = rp.role_id
            WHERE ur.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error resolving permissions for user: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        rows.into_iter().map(Permission::try_from).collect()
    }
}
