//! Refresh token repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::RefreshToken;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, DomainError>;

    async fn create(&self, token: &RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Atomically flip `revoked` from false to true for `token`.
    ///
    /// Returns whether this caller performed the flip. Two concurrent
    /// calls for the same token value must see exactly one `true`;
    /// adapters implement this as a conditional update
    /// (`... SET revoked = TRUE WHERE token = $1 AND revoked = FALSE`),
    /// never a blind overwrite. This is what makes refresh-token
    /// rotation single-use under concurrency.
    async fn claim(&self, token: &str) -> Result<bool, DomainError>;

    /// Revoke every live token held by a user. Out-of-band security
    /// action (account deactivation, credential reset).
    async fn revoke_all_for_user(&self, user_id: &Uuid) -> Result<u64, DomainError>;
}
