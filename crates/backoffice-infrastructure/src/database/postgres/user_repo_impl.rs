// ============================================================================
// Back Office Infrastructure - PostgreSQL User Repository
// File: crates/backoffice-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use backoffice_core::domain::User;
use backoffice_core::error::DomainError;
use backoffice_core::repositories::UserRepository;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub active: bool,
    pub failed_attempts: i32,
    pub locked_at: Option<DateTime<Utc>>,
    pub last_failed_login_at: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            active: row.active,
            failed_attempts: row.failed_attempts,
            locked_at: row.locked_at,
            last_failed_login_at: row.last_failed_login_at,
            last_login: row.last_login,
            created_at: row.created_at,
            modified_at: row.modified_at,
            removed_at: row.removed_at,
        }
    }
}

const USER_COLUMNS: &str = r#"
    id, username, email, password_hash,
    active, failed_attempts, locked_at, last_failed_login_at, last_login,
    created_at, modified_at, removed_at
"#;

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding user by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding user by username: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding user by email: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, user: &User) -> Result<User, DomainError> {
        info!("Creating user: {}", user.username);

        let row: UserRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO users (
                id, username, email, password_hash,
                active, failed_attempts, locked_at, last_failed_login_at, last_login,
                created_at, modified_at, removed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.active)
        .bind(user.failed_attempts)
        .bind(user.locked_at)
        .bind(user.last_failed_login_at)
        .bind(user.last_login)
        .bind(user.created_at)
        .bind(user.modified_at)
        .bind(user.removed_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating user: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    // Writes the whole security column set in one statement keyed on id.
    // Concurrent failed logins for the same user serialize on the row
    // lock, but last-writer-wins on the counter value itself; see the
    // trait docs.
    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let row: UserRow = sqlx::query_as(&format!(
            r#"
            UPDATE users SET
                email = $2,
                password_hash = $3,
                active = $4,
                failed_attempts = $5,
                locked_at = $6,
                last_failed_login_at = $7,
                last_login = $8,
                modified_at = $9,
                removed_at = $10
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.active)
        .bind(user.failed_attempts)
        .bind(user.locked_at)
        .bind(user.last_failed_login_at)
        .bind(user.last_login)
        .bind(user.modified_at)
        .bind(user.removed_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating user: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn soft_delete(&self, id: &Uuid, removed_at: DateTime<Utc>) -> Result<(), DomainError> {
        sqlx::query("UPDATE users SET removed_at = $2, modified_at = $2 WHERE id = $1")
            .bind(id)
            .bind(removed_at)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error soft-deleting user: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }
}
