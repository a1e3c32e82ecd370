//! Audit log entity (immutable event record)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Security-relevant domain events recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Login,
    LoginFailed,
    Logout,
    AccountLocked,
    AccountUnlocked,
    PermissionDenied,
    UserCreated,
    UserDeleted,
    RoleCreated,
    RoleUpdated,
    RoleDeleted,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Login => "LOGIN",
            AuditAction::LoginFailed => "LOGIN_FAILED",
            AuditAction::Logout => "LOGOUT",
            AuditAction::AccountLocked => "ACCOUNT_LOCKED",
            AuditAction::AccountUnlocked => "ACCOUNT_UNLOCKED",
            AuditAction::PermissionDenied => "PERMISSION_DENIED",
            AuditAction::UserCreated => "USER_CREATED",
            AuditAction::UserDeleted => "USER_DELETED",
            AuditAction::RoleCreated => "ROLE_CREATED",
            AuditAction::RoleUpdated => "ROLE_UPDATED",
            AuditAction::RoleDeleted => "ROLE_DELETED",
        }
    }
}

/// Immutable audit entry. Created once per significant event, never
/// updated or deleted by this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub username: Option<String>,
    pub entity: String,
    pub entity_id: Option<Uuid>,
    pub action: AuditAction,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    pub fn new(action: AuditAction, entity: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: None,
            username: None,
            entity: entity.into(),
            entity_id: None,
            action,
            ip_address: None,
            user_agent: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_user(mut self, user_id: Uuid, username: impl Into<String>) -> Self {
        self.user_id = Some(user_id);
        self.username = Some(username.into());
        self
    }

    pub fn with_user_id(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_entity_id(mut self, entity_id: Uuid) -> Self {
        self.entity_id = Some(entity_id);
        self
    }

    pub fn with_client(mut self, ip_address: Option<String>, user_agent: Option<String>) -> Self {
        self.ip_address = ip_address;
        self.user_agent = user_agent;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_populates_optional_fields() {
        let user_id = Uuid::new_v4();
        let entry = AuditLog::new(AuditAction::Login, "User")
            .with_user(user_id, "alice")
            .with_client(Some("10.0.0.1".into()), Some("cli/1.0".into()));

        assert_eq!(entry.action, AuditAction::Login);
        assert_eq!(entry.user_id, Some(user_id));
        assert_eq!(entry.username.as_deref(), Some("alice"));
        assert_eq!(entry.ip_address.as_deref(), Some("10.0.0.1"));
        assert_eq!(entry.entity_id, None);
    }
}
