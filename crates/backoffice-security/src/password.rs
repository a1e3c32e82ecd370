//! Password hashing with Argon2

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use backoffice_core::error::DomainError;
use backoffice_core::security::PasswordEncoder;

pub struct Argon2PasswordEncoder;

impl PasswordEncoder for Argon2PasswordEncoder {
    fn hash(&self, plain: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        argon2
            .hash_password(plain.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))
    }

    fn matches(&self, plain: &str, digest: &str) -> Result<bool, DomainError> {
        let parsed_hash = PasswordHash::new(digest)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(plain.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
