//! Domain services (business logic)

pub mod auth_service;
pub mod lockout;
pub mod permission_service;
pub mod user_service;

pub use auth_service::{AuthService, AuthTokens, LoginCommand};
pub use lockout::AccountLockoutPolicy;
pub use permission_service::PermissionService;
pub use user_service::{RegisterUserCommand, UserService};

#[cfg(test)]
pub(crate) mod testing;
