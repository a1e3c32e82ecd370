//! Password strength scoring with zxcvbn

use zxcvbn::{zxcvbn, Score};

use backoffice_core::error::DomainError;
use backoffice_core::security::PasswordStrengthPolicy;

/// Strength gate backed by the zxcvbn estimator. Anything scoring below
/// `Score::Three` (out of four) is rejected; length bounds are enforced
/// separately by the registration flow.
pub struct ZxcvbnStrengthPolicy;

impl PasswordStrengthPolicy for ZxcvbnStrengthPolicy {
    fn check(&self, plain: &str) -> Result<(), DomainError> {
        let entropy = zxcvbn(plain, &[]);
        if entropy.score() < Score::Three {
            return Err(DomainError::PasswordTooWeak);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_common_passwords() {
        let policy = ZxcvbnStrengthPolicy;
        for weak in ["password", "qwerty123", "letmein!"] {
            let err = policy.check(weak).unwrap_err();
            assert!(matches!(err, DomainError::PasswordTooWeak));
        }
    }

    #[test]
    fn accepts_a_strong_passphrase() {
        let policy = ZxcvbnStrengthPolicy;
        assert!(policy.check("mellow quartz submarine 47 lantern").is_ok());
    }
}
