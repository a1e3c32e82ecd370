//! Role/permission resolution trait (port)
//!
//! Role assignment and role CRUD live outside this core; the
//! orchestrator only needs to resolve what a user ends up granted.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Permission;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RolePermissionRepository: Send + Sync {
    async fn role_names_for_user(&self, user_id: &Uuid) -> Result<Vec<String>, DomainError>;
    async fn permissions_for_user(&self, user_id: &Uuid) -> Result<Vec<Permission>, DomainError>;
}
