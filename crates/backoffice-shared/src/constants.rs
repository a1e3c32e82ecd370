//! Application-wide constants

/// Consecutive failed logins that lock an account.
pub const MAX_FAILED_LOGIN_ATTEMPTS: i32 = 5;

/// Advertised access-token lifetime in seconds.
pub const ACCESS_TOKEN_TTL_SECONDS: i64 = 1800;

/// Refresh-token validity window in days.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;
