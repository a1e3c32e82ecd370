// ============================================================================
// Back Office Core - Authentication Service
// File: crates/backoffice-core/src/services/auth_service.rs
// ============================================================================
//! Authentication orchestrator: login, refresh-token rotation, logout.

use std::sync::Arc;

use backoffice_shared::constants::ACCESS_TOKEN_TTL_SECONDS;
use chrono::Utc;
use tracing::{error, info, warn};

use crate::domain::{AuditAction, AuditLog, RefreshToken, User};
use crate::error::DomainError;
use crate::repositories::{
    AuditLogRepository, RefreshTokenRepository, RolePermissionRepository, UserRepository,
};
use crate::security::{PasswordEncoder, RefreshTokenGenerator, TokenIssuer};
use crate::services::lockout::AccountLockoutPolicy;

const AUDIT_ENTITY_USER: &str = "User";

/// Login command as received from the transport layer.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Token pair returned by login and refresh. `expires_in` is the
/// advertised access-token lifetime in seconds; it is a fixed constant,
/// not read back out of the signed token.
#[derive(Debug, Clone)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Composes the lockout policy, password encoder, token issuer, and
/// repositories into the login/refresh/logout use cases. Stateless
/// between requests; every invocation is one sequential unit of work.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    refresh_tokens: Arc<dyn RefreshTokenRepository>,
    role_permissions: Arc<dyn RolePermissionRepository>,
    audit: Arc<dyn AuditLogRepository>,
    password_encoder: Arc<dyn PasswordEncoder>,
    token_issuer: Arc<dyn TokenIssuer>,
    token_values: Arc<dyn RefreshTokenGenerator>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        refresh_tokens: Arc<dyn RefreshTokenRepository>,
        role_permissions: Arc<dyn RolePermissionRepository>,
        audit: Arc<dyn AuditLogRepository>,
        password_encoder: Arc<dyn PasswordEncoder>,
        token_issuer: Arc<dyn TokenIssuer>,
        token_values: Arc<dyn RefreshTokenGenerator>,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            role_permissions,
            audit,
            password_encoder,
            token_issuer,
            token_values,
        }
    }

    /// Login with username and password.
    ///
    /// Unknown, deleted, and wrong-password accounts all surface as
    /// `InvalidCredentials`; locked and inactive accounts surface as
    /// `AccountLocked`. The failure path has side effects: the attempt
    /// counter and any lock transition are persisted, and audited,
    /// before the error is returned. Lockout state is durable before
    /// any token is issued.
    pub async fn login(&self, cmd: LoginCommand) -> Result<AuthTokens, DomainError> {
        info!("login attempt for username: {}", cmd.username);

        let Some(mut user) = self.users.find_by_username(&cmd.username).await? else {
            warn!("login failed: unknown username: {}", cmd.username);
            return Err(DomainError::InvalidCredentials);
        };

        // Deleted accounts behave identically to nonexistent ones.
        if user.is_deleted() {
            warn!("login failed: deleted account: {}", cmd.username);
            return Err(DomainError::InvalidCredentials);
        }

        // Locked (and inactive-pending-lock) accounts are rejected
        // before any password check or state mutation.
        if user.is_locked() || !user.active {
            warn!("login failed: account locked or inactive: {}", cmd.username);
            return Err(DomainError::AccountLocked);
        }

        let password_ok = self
            .password_encoder
            .matches(&cmd.password, &user.password_hash)
            .map_err(|_e| DomainError::InvalidCredentials)?;

        let now = Utc::now();

        if !password_ok {
            let just_locked = AccountLockoutPolicy::record_failure(&mut user, now);
            self.users.update(&user).await?;

            self.record_audit(
                AuditLog::new(AuditAction::LoginFailed, AUDIT_ENTITY_USER)
                    .with_user(user.id, &user.username)
                    .with_client(cmd.ip_address.clone(), cmd.user_agent.clone()),
            )
            .await;

            if just_locked {
                warn!("account locked after repeated failures: {}", cmd.username);
                self.record_audit(
                    AuditLog::new(AuditAction::AccountLocked, AUDIT_ENTITY_USER)
                        .with_user(user.id, &user.username)
                        .with_client(cmd.ip_address, cmd.user_agent),
                )
                .await;
                return Err(DomainError::AccountLocked);
            }
            return Err(DomainError::InvalidCredentials);
        }

        AccountLockoutPolicy::record_success(&mut user, now);
        self.users.update(&user).await?;

        let tokens = self.issue_tokens(&user).await?;

        self.record_audit(
            AuditLog::new(AuditAction::Login, AUDIT_ENTITY_USER)
                .with_user(user.id, &user.username)
                .with_client(cmd.ip_address, cmd.user_agent),
        )
        .await;

        info!("login successful for: {}", cmd.username);
        Ok(tokens)
    }

    /// Exchange a refresh token for a fresh token pair.
    ///
    /// The presented token is revoked with an atomic claim before
    /// anything else happens, so two concurrent calls with the same
    /// value produce exactly one new pair. Refresh writes no audit
    /// entry.
    pub async fn refresh(&self, token_value: &str) -> Result<AuthTokens, DomainError> {
        let stored = self
            .refresh_tokens
            .find_by_token(token_value)
            .await?
            .ok_or(DomainError::InvalidRefreshToken)?;

        if !stored.is_valid() {
            return Err(DomainError::InvalidRefreshToken);
        }

        if !self.refresh_tokens.claim(token_value).await? {
            warn!("refresh token already claimed, rejecting reuse");
            return Err(DomainError::InvalidRefreshToken);
        }

        let user = self
            .users
            .find_by_id(&stored.user_id)
            .await?
            .ok_or(DomainError::InvalidRefreshToken)?;

        self.issue_tokens(&user).await
    }

    /// Revoke a refresh token. Idempotent: unknown or already-revoked
    /// tokens are a silent no-op with no audit entry.
    pub async fn logout(&self, token_value: &str) -> Result<(), DomainError> {
        let Some(stored) = self.refresh_tokens.find_by_token(token_value).await? else {
            return Ok(());
        };

        if !self.refresh_tokens.claim(token_value).await? {
            return Ok(());
        }

        let mut entry = AuditLog::new(AuditAction::Logout, AUDIT_ENTITY_USER);
        if let Some(owner) = self.users.find_by_id(&stored.user_id).await? {
            entry = entry.with_user(owner.id, &owner.username);
        }
        self.record_audit(entry).await;

        info!("logout: refresh token revoked");
        Ok(())
    }

    /// Resolve roles and permission claims, mint the access token, and
    /// persist a new refresh token. Shared by login and refresh.
    async fn issue_tokens(&self, user: &User) -> Result<AuthTokens, DomainError> {
        let roles = self.role_permissions.role_names_for_user(&user.id).await?;
        let permissions = self
            .role_permissions
            .permissions_for_user(&user.id)
            .await?;
        let claims: Vec<String> = permissions.iter().map(|p| p.claim()).collect();

        let access_token = self.token_issuer.issue(user, &roles, &claims)?;

        let refresh = RefreshToken::issue(user.id, self.token_values.generate());
        let refresh = self.refresh_tokens.create(&refresh).await?;

        Ok(AuthTokens {
            access_token,
            refresh_token: refresh.token,
            expires_in: ACCESS_TOKEN_TTL_SECONDS,
        })
    }

    async fn record_audit(&self, entry: AuditLog) {
        if let Err(e) = self.audit.append(&entry).await {
            error!("failed to append audit entry: {}", e);
        }
    }
}
