//! Refresh token entity (session continuation credential)

use backoffice_shared::constants::REFRESH_TOKEN_TTL_DAYS;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Single-use continuation credential bound to one user.
///
/// Mutated exactly once, from `revoked = false` to `revoked = true`, on
/// rotation or logout. Expiry is passive; no background sweep is needed
/// for correctness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
}

impl RefreshToken {
    /// Issue a fresh token for `user_id` with the fixed validity window.
    /// `token_value` must come from a cryptographically secure source.
    pub fn issue(user_id: Uuid, token_value: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            token: token_value.into(),
            created_at: now,
            expires_at: now + Duration::days(REFRESH_TOKEN_TTL_DAYS),
            revoked: false,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    pub fn is_valid(&self) -> bool {
        !self.revoked && !self.is_expired()
    }
}
