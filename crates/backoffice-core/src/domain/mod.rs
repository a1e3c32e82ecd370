//! Domain entities for the authentication and access-control core.

pub mod audit_log;
pub mod permission;
pub mod refresh_token;
pub mod user;

pub use audit_log::{AuditAction, AuditLog};
pub use permission::{Permission, PermissionAction};
pub use refresh_token::RefreshToken;
pub use user::User;
