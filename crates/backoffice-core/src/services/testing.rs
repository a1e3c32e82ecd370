//! In-memory test doubles for orchestration-flow tests.
//!
//! The fakes mirror the storage-layer atomicity contracts: the refresh
//! token claim is a compare-and-set under one mutex, so concurrency
//! tests against them pin the same single-use behavior the Postgres
//! adapters provide.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{AuditLog, Permission, RefreshToken, User};
use crate::error::DomainError;
use crate::repositories::{
    AuditLogRepository, RefreshTokenRepository, RolePermissionRepository, UserRepository,
};
use crate::security::{PasswordEncoder, PasswordStrengthPolicy, RefreshTokenGenerator, TokenIssuer};

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUsers {
    pub fn with(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users.into_iter().map(|u| (u.id, u)).collect()),
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<User> {
        self.users.lock().unwrap().get(id).cloned()
    }

    pub fn get_by_username(&self, username: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.username == username)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<User, DomainError> {
        self.users.lock().unwrap().insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        self.users.lock().unwrap().insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn soft_delete(&self, id: &Uuid, removed_at: DateTime<Utc>) -> Result<(), DomainError> {
        if let Some(user) = self.users.lock().unwrap().get_mut(id) {
            user.removed_at = Some(removed_at);
            user.modified_at = Some(removed_at);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryRefreshTokens {
    tokens: Mutex<Vec<RefreshToken>>,
}

impl InMemoryRefreshTokens {
    pub fn live_count_for(&self, user_id: &Uuid) -> usize {
        self.tokens
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == *user_id && t.is_valid())
            .count()
    }

    pub fn insert(&self, token: RefreshToken) {
        self.tokens.lock().unwrap().push(token);
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokens {
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, DomainError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.token == token)
            .cloned())
    }

    async fn create(&self, token: &RefreshToken) -> Result<RefreshToken, DomainError> {
        self.tokens.lock().unwrap().push(token.clone());
        Ok(token.clone())
    }

    async fn claim(&self, token: &str) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.lock().unwrap();
        match tokens.iter_mut().find(|t| t.token == token && !t.revoked) {
            Some(stored) => {
                stored.revoked = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn revoke_all_for_user(&self, user_id: &Uuid) -> Result<u64, DomainError> {
        let mut tokens = self.tokens.lock().unwrap();
        let mut revoked = 0;
        for stored in tokens.iter_mut().filter(|t| t.user_id == *user_id && !t.revoked) {
            stored.revoked = true;
            revoked += 1;
        }
        Ok(revoked)
    }
}

/// Static grant table keyed by user id.
#[derive(Default)]
pub struct StaticRolePermissions {
    pub roles: HashMap<Uuid, Vec<String>>,
    pub permissions: HashMap<Uuid, Vec<Permission>>,
}

#[async_trait]
impl RolePermissionRepository for StaticRolePermissions {
    async fn role_names_for_user(&self, user_id: &Uuid) -> Result<Vec<String>, DomainError> {
        Ok(self.roles.get(user_id).cloned().unwrap_or_default())
    }

    async fn permissions_for_user(&self, user_id: &Uuid) -> Result<Vec<Permission>, DomainError> {
        Ok(self.permissions.get(user_id).cloned().unwrap_or_default())
    }
}

/// Captures appended entries so tests can assert exact call sequences.
#[derive(Default)]
pub struct RecordingAudit {
    entries: Mutex<Vec<AuditLog>>,
}

impl RecordingAudit {
    pub fn entries(&self) -> Vec<AuditLog> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditLogRepository for RecordingAudit {
    async fn append(&self, entry: &AuditLog) -> Result<(), DomainError> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

/// Plain-text "encoder": digest == plain. Good enough for flow tests.
pub struct PlainTextEncoder;

impl PasswordEncoder for PlainTextEncoder {
    fn hash(&self, plain: &str) -> Result<String, DomainError> {
        Ok(plain.to_string())
    }

    fn matches(&self, plain: &str, digest: &str) -> Result<bool, DomainError> {
        Ok(plain == digest)
    }
}

/// Accepts any password; flow tests opt into rejection via the mock.
pub struct AnyStrength;

impl PasswordStrengthPolicy for AnyStrength {
    fn check(&self, _plain: &str) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Issues `"access-for:<username>"` so tests can tell tokens apart.
pub struct StaticTokenIssuer;

impl TokenIssuer for StaticTokenIssuer {
    fn issue(
        &self,
        user: &User,
        _roles: &[String],
        _permissions: &[String],
    ) -> Result<String, DomainError> {
        Ok(format!("access-for:{}", user.username))
    }
}

/// Monotonic counter-backed token values: "rt-1", "rt-2", ...
#[derive(Default)]
pub struct SequentialTokenValues {
    next: Mutex<u64>,
}

impl RefreshTokenGenerator for SequentialTokenValues {
    fn generate(&self) -> String {
        let mut next = self.next.lock().unwrap();
        *next += 1;
        format!("rt-{}", *next)
    }
}
