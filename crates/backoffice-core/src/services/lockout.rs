//! Account lockout policy
//!
//! Pure state-transition logic over a [`User`]'s failed-attempt counter
//! and lock flag. No I/O, never errors; callers decide what to do with
//! the resulting state.

use backoffice_shared::constants::MAX_FAILED_LOGIN_ATTEMPTS;
use chrono::{DateTime, Utc};

use crate::domain::User;

pub struct AccountLockoutPolicy;

impl AccountLockoutPolicy {
    /// Record one failed password check.
    ///
    /// Locking is edge-triggered at exactly the threshold failure; it is
    /// not re-applied on later failures while already locked. Returns
    /// whether this call caused the lock transition.
    pub fn record_failure(user: &mut User, now: DateTime<Utc>) -> bool {
        user.failed_attempts += 1;
        user.last_failed_login_at = Some(now);
        if user.failed_attempts == MAX_FAILED_LOGIN_ATTEMPTS {
            user.active = false;
            user.locked_at = Some(now);
            return true;
        }
        false
    }

    /// Record a successful password check. Clears the counter but leaves
    /// `active`/`locked_at` alone; those are cleared only by [`unlock`].
    ///
    /// [`unlock`]: AccountLockoutPolicy::unlock
    pub fn record_success(user: &mut User, now: DateTime<Utc>) {
        user.failed_attempts = 0;
        user.last_failed_login_at = None;
        user.last_login = Some(now);
    }

    /// Explicit unlock. Idempotent, callable regardless of current state.
    pub fn unlock(user: &mut User) {
        user.active = true;
        user.failed_attempts = 0;
        user.locked_at = None;
    }
}
