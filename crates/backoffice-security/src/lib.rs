//! # Back Office Security
//!
//! Concrete security adapters: Argon2 password encoding, JWT access
//! tokens, opaque refresh-token value generation, password strength
//! scoring.

pub mod jwt;
pub mod password;
pub mod password_strength;
pub mod token_value;

pub use jwt::JwtTokenIssuer;
pub use password::Argon2PasswordEncoder;
pub use password_strength::ZxcvbnStrengthPolicy;
pub use token_value::RandomTokenGenerator;
