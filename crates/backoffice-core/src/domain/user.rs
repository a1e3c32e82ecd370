//! User domain entity

use backoffice_shared::constants::MAX_FAILED_LOGIN_ATTEMPTS;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Identity plus account-security state.
///
/// Lockout is a durable state: once `failed_attempts` reaches the
/// threshold the account is deactivated and stays deactivated until an
/// explicit unlock, even across successful password checks.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct User {
    pub id: Uuid,
    pub username: String,

    #[validate(email)]
    pub email: String,
    pub password_hash: String,

    pub active: bool,
    pub failed_attempts: i32,
    pub locked_at: Option<DateTime<Utc>>,
    pub last_failed_login_at: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(username: impl Into<String>, email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            active: true,
            failed_attempts: 0,
            locked_at: None,
            last_failed_login_at: None,
            last_login: None,
            created_at: Utc::now(),
            modified_at: None,
            removed_at: None,
        }
    }

    pub fn is_locked(&self) -> bool {
        !self.active && self.failed_attempts >= MAX_FAILED_LOGIN_ATTEMPTS
    }

    pub fn is_deleted(&self) -> bool {
        self.removed_at.is_some()
    }

    /// Whether this account can pass authentication at all. Deleted and
    /// locked accounts never can; neither can inactive-but-not-yet-locked
    /// ones.
    pub fn can_login(&self) -> bool {
        self.active && !self.is_deleted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_is_active_with_zero_failures() {
        let user = User::new("alice", "alice@example.com", "digest");
        assert!(user.active);
        assert_eq!(user.failed_attempts, 0);
        assert!(!user.is_locked());
        assert!(!user.is_deleted());
        assert!(user.can_login());
    }

    #[test]
    fn locked_requires_both_inactive_and_threshold() {
        let mut user = User::new("bob", "bob@example.com", "digest");
        user.failed_attempts = MAX_FAILED_LOGIN_ATTEMPTS;
        assert!(!user.is_locked(), "still active");
        user.active = false;
        assert!(user.is_locked());
    }

    #[test]
    fn soft_deleted_user_cannot_login() {
        let mut user = User::new("carol", "carol@example.com", "digest");
        user.removed_at = Some(Utc::now());
        assert!(user.is_deleted());
        assert!(!user.can_login());
    }
}
