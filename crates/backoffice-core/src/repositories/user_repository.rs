//! User repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::User;
use crate::error::DomainError;

/// System of record for [`User`] security state.
///
/// `update` persists the full security column set keyed on id. Two
/// concurrent failed logins for the same user contend on the
/// failed-attempt counter; adapters are expected to serialize those
/// writes (row-level locking or a conditional update). The domain layer
/// does not guard this in-process.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn create(&self, user: &User) -> Result<User, DomainError>;
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Marks the row deleted by stamping `removed_at`. Idempotent at the
    /// storage level; the row is never hard-deleted.
    async fn soft_delete(&self, id: &Uuid, removed_at: DateTime<Utc>) -> Result<(), DomainError>;
}
