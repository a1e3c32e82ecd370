//! User administration service: registration, unlock, deactivation.

use std::sync::Arc;

use backoffice_shared::constants::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{AuditAction, AuditLog, User};
use crate::error::DomainError;
use crate::repositories::{AuditLogRepository, RefreshTokenRepository, UserRepository};
use crate::security::{PasswordEncoder, PasswordStrengthPolicy};
use crate::services::lockout::AccountLockoutPolicy;

const AUDIT_ENTITY_USER: &str = "User";

#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub struct UserService {
    users: Arc<dyn UserRepository>,
    refresh_tokens: Arc<dyn RefreshTokenRepository>,
    audit: Arc<dyn AuditLogRepository>,
    password_encoder: Arc<dyn PasswordEncoder>,
    password_strength: Arc<dyn PasswordStrengthPolicy>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        refresh_tokens: Arc<dyn RefreshTokenRepository>,
        audit: Arc<dyn AuditLogRepository>,
        password_encoder: Arc<dyn PasswordEncoder>,
        password_strength: Arc<dyn PasswordStrengthPolicy>,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            audit,
            password_encoder,
            password_strength,
        }
    }

    /// Register a new account: active, zero failures.
    pub async fn register(&self, cmd: RegisterUserCommand) -> Result<User, DomainError> {
        info!("registration attempt for username: {}", cmd.username);

        if cmd.username.trim().is_empty() {
            return Err(DomainError::ValidationError("username cannot be empty".into()));
        }
        if cmd.password.len() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::PasswordTooShort);
        }
        if cmd.password.len() > MAX_PASSWORD_LENGTH {
            return Err(DomainError::PasswordTooLong);
        }
        self.password_strength.check(&cmd.password)?;

        if self.users.find_by_username(&cmd.username).await?.is_some() {
            warn!("registration failed: username already exists: {}", cmd.username);
            return Err(DomainError::UsernameAlreadyExists(cmd.username));
        }
        if self.users.find_by_email(&cmd.email).await?.is_some() {
            warn!(
                "registration failed: email already exists: {}",
                backoffice_shared::utils::mask_email(&cmd.email)
            );
            return Err(DomainError::EmailAlreadyExists(cmd.email));
        }

        let digest = self.password_encoder.hash(&cmd.password)?;
        let user = User::new(cmd.username, cmd.email, digest);
        user.validate()
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        let created = self.users.create(&user).await?;

        self.record_audit(
            AuditLog::new(AuditAction::UserCreated, AUDIT_ENTITY_USER)
                .with_user(created.id, &created.username)
                .with_entity_id(created.id),
        )
        .await;

        info!("registration successful for: {}", created.username);
        Ok(created)
    }

    /// Explicitly clear a lockout. Idempotent.
    pub async fn unlock(&self, user_id: &Uuid) -> Result<(), DomainError> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        AccountLockoutPolicy::unlock(&mut user);
        user.modified_at = Some(Utc::now());
        self.users.update(&user).await?;

        self.record_audit(
            AuditLog::new(AuditAction::AccountUnlocked, AUDIT_ENTITY_USER)
                .with_user(user.id, &user.username),
        )
        .await;

        info!("account unlocked: {}", user.username);
        Ok(())
    }

    /// Soft-delete an account and revoke every live refresh token it
    /// holds. The row is never hard-deleted by this core.
    pub async fn deactivate(&self, user_id: &Uuid) -> Result<(), DomainError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        if user.is_deleted() {
            return Ok(());
        }

        self.users.soft_delete(user_id, Utc::now()).await?;

        let revoked = self.refresh_tokens.revoke_all_for_user(user_id).await?;
        info!("deactivated {}: revoked {} refresh token(s)", user.username, revoked);

        self.record_audit(
            AuditLog::new(AuditAction::UserDeleted, AUDIT_ENTITY_USER)
                .with_user(user.id, &user.username)
                .with_entity_id(user.id),
        )
        .await;

        Ok(())
    }

    async fn record_audit(&self, entry: AuditLog) {
        if let Err(e) = self.audit.append(&entry).await {
            error!("failed to append audit entry: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::MockPasswordStrengthPolicy;
    use crate::services::testing::{
        AnyStrength, InMemoryRefreshTokens, InMemoryUsers, PlainTextEncoder, RecordingAudit,
    };
    use crate::domain::RefreshToken;

    struct Harness {
        service: UserService,
        users: Arc<InMemoryUsers>,
        refresh_tokens: Arc<InMemoryRefreshTokens>,
        audit: Arc<RecordingAudit>,
    }

    fn harness(seed_users: Vec<User>) -> Harness {
        harness_with_strength(seed_users, Arc::new(AnyStrength))
    }

    fn harness_with_strength(
        seed_users: Vec<User>,
        strength: Arc<dyn PasswordStrengthPolicy>,
    ) -> Harness {
        let users = Arc::new(InMemoryUsers::with(seed_users));
        let refresh_tokens = Arc::new(InMemoryRefreshTokens::default());
        let audit = Arc::new(RecordingAudit::default());
        let service = UserService::new(
            users.clone(),
            refresh_tokens.clone(),
            audit.clone(),
            Arc::new(PlainTextEncoder),
            strength,
        );
        Harness {
            service,
            users,
            refresh_tokens,
            audit,
        }
    }

    fn register_cmd(username: &str) -> RegisterUserCommand {
        RegisterUserCommand {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "correct horse battery".to_string(),
        }
    }

    #[tokio::test]
    async fn register_creates_active_user_and_audits() {
        let h = harness(vec![]);
        let user = h.service.register(register_cmd("mallory")).await.unwrap();

        assert!(user.active);
        assert_eq!(user.failed_attempts, 0);
        assert!(h.users.get(&user.id).is_some());

        let entries = h.audit.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::UserCreated);
        assert_eq!(entries[0].entity_id, Some(user.id));
    }

    #[tokio::test]
    async fn register_rejects_duplicates_and_short_passwords() {
        let existing = User::new("nina", "nina@example.com", "digest");
        let h = harness(vec![existing]);

        let err = h.service.register(register_cmd("nina")).await.unwrap_err();
        assert!(matches!(err, DomainError::UsernameAlreadyExists(_)));

        let mut cmd = register_cmd("other");
        cmd.email = "nina@example.com".to_string();
        let err = h.service.register(cmd).await.unwrap_err();
        assert!(matches!(err, DomainError::EmailAlreadyExists(_)));

        let mut cmd = register_cmd("short");
        cmd.password = "tiny".to_string();
        let err = h.service.register(cmd).await.unwrap_err();
        assert!(matches!(err, DomainError::PasswordTooShort));
    }

    #[tokio::test]
    async fn register_rejects_weak_passwords() {
        let mut strength = MockPasswordStrengthPolicy::new();
        strength
            .expect_check()
            .returning(|_| Err(DomainError::PasswordTooWeak));
        let h = harness_with_strength(vec![], Arc::new(strength));

        let err = h.service.register(register_cmd("sybil")).await.unwrap_err();
        assert!(matches!(err, DomainError::PasswordTooWeak));
        assert!(h.users.get_by_username("sybil").is_none());
        assert!(h.audit.entries().is_empty());
    }

    #[tokio::test]
    async fn register_rejects_invalid_email() {
        let h = harness(vec![]);
        let mut cmd = register_cmd("oscar");
        cmd.email = "not-an-email".to_string();
        let err = h.service.register(cmd).await.unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[tokio::test]
    async fn unlock_restores_a_locked_account() {
        let mut user = User::new("pat", "pat@example.com", "digest");
        user.active = false;
        user.failed_attempts = 5;
        user.locked_at = Some(Utc::now());
        let user_id = user.id;
        let h = harness(vec![user]);

        h.service.unlock(&user_id).await.unwrap();

        let persisted = h.users.get(&user_id).unwrap();
        assert!(persisted.active);
        assert_eq!(persisted.failed_attempts, 0);
        assert!(persisted.locked_at.is_none());

        let entries = h.audit.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::AccountUnlocked);
    }

    #[tokio::test]
    async fn unlock_unknown_user_fails() {
        let h = harness(vec![]);
        let err = h.service.unlock(&Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound));
    }

    #[tokio::test]
    async fn deactivate_soft_deletes_and_revokes_all_tokens() {
        let user = User::new("quinn", "quinn@example.com", "digest");
        let user_id = user.id;
        let h = harness(vec![user]);
        h.refresh_tokens.insert(RefreshToken::issue(user_id, "device-a"));
        h.refresh_tokens.insert(RefreshToken::issue(user_id, "device-b"));

        h.service.deactivate(&user_id).await.unwrap();

        let persisted = h.users.get(&user_id).unwrap();
        assert!(persisted.is_deleted());
        assert_eq!(h.refresh_tokens.live_count_for(&user_id), 0);

        let entries = h.audit.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::UserDeleted);
    }

    #[tokio::test]
    async fn deactivate_is_idempotent() {
        let mut user = User::new("ruth", "ruth@example.com", "digest");
        user.removed_at = Some(Utc::now());
        let user_id = user.id;
        let h = harness(vec![user]);

        h.service.deactivate(&user_id).await.unwrap();
        assert!(h.audit.entries().is_empty());
    }
}
