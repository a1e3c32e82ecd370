//! PostgreSQL repository implementations

pub mod audit_log_repo_impl;
pub mod refresh_token_repo_impl;
pub mod role_permission_repo_impl;
pub mod user_repo_impl;

pub use audit_log_repo_impl::PgAuditLogRepository;
pub use refresh_token_repo_impl::PgRefreshTokenRepository;
pub use role_permission_repo_impl::PgRolePermissionRepository;
pub use user_repo_impl::PgUserRepository;
