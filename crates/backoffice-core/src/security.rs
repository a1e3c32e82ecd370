//! Security ports
//!
//! Contracts for the cryptographic collaborators. Hashing, signing, and
//! condition grammar internals live behind these traits; the core only
//! depends on their observable behavior.

use std::collections::HashMap;

use serde_json::Value;

use crate::domain::User;
use crate::error::DomainError;

/// Password hashing contract.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordEncoder: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String, DomainError>;
    fn matches(&self, plain: &str, digest: &str) -> Result<bool, DomainError>;
}

/// Signed access-token issuance contract. The token is opaque to this
/// core; claims layout and signature are the implementer's concern.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    fn issue(
        &self,
        user: &User,
        roles: &[String],
        permissions: &[String],
    ) -> Result<String, DomainError>;
}

/// Password strength gate applied at registration, after the length
/// bounds. Scoring model is the implementer's concern.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordStrengthPolicy: Send + Sync {
    fn check(&self, plain: &str) -> Result<(), DomainError>;
}

/// Source of opaque refresh-token values. Implementations must draw at
/// least 128 bits from a cryptographically secure generator.
#[cfg_attr(test, mockall::automock)]
pub trait RefreshTokenGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Runtime predicate evaluation for conditional permission grants.
///
/// The expression grammar is owned by the implementation. An expression
/// that cannot be parsed or evaluated counts as `false` (deny).
#[cfg_attr(test, mockall::automock)]
pub trait ConditionEvaluator: Send + Sync {
    fn evaluate(&self, expression: &str, context: &HashMap<String, Value>) -> bool;
}
