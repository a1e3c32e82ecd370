//! Opaque refresh-token value generation

use backoffice_core::security::RefreshTokenGenerator;
use rand::Rng;

/// 256 bits from the thread-local CSPRNG, hex-encoded.
pub struct RandomTokenGenerator;

impl RefreshTokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> String {
        let bytes: [u8; 32] = rand::rng().random();
        hex::encode(bytes)
    }
}
