//! Repository traits (ports)

pub mod audit_log_repository;
pub mod refresh_token_repository;
pub mod role_permission_repository;
pub mod user_repository;

pub use audit_log_repository::AuditLogRepository;
pub use refresh_token_repository::RefreshTokenRepository;
pub use role_permission_repository::RolePermissionRepository;
pub use user_repository::UserRepository;
