//! JWT access-token issuance

use backoffice_core::domain::User;
use backoffice_core::error::DomainError;
use backoffice_core::security::TokenIssuer;
use backoffice_shared::constants::TOKEN_TYPE_ACCESS;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
}

/// Claims carried by an access token: identity plus the roles and
/// permission strings resolved at issuance time.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    pub username: String,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
    pub iat: i64,
    pub exp: i64,
    pub token_type: String,
}

pub struct JwtTokenIssuer {
    secret: String,
    access_token_expiry: i64,
}

impl JwtTokenIssuer {
    pub fn new(secret: String, access_expiry_seconds: i64) -> Self {
        Self {
            secret,
            access_token_expiry: access_expiry_seconds,
        }
    }

    /// Decode and verify a token this issuer produced. Used by callers
    /// validating inbound requests; the core itself never decodes.
    pub fn validate_token(&self, token: &str) -> Result<AccessClaims, JwtError> {
        decode::<AccessClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| JwtError::ValidationError(e.to_string()))
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(
        &self,
        user: &User,
        roles: &[String],
        permissions: &[String],
    ) -> Result<String, DomainError> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            roles: roles.to_vec(),
            permissions: permissions.to_vec(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
            token_type: TOKEN_TYPE_ACCESS.to_string(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| DomainError::TokenGenerationError(e.to_string()))
    }
}
