// Credential Hasher Port

use crate::error::{AppError, Result};

/// Password hashing interface (allows cheap fakes in tests; argon2 at
/// default cost is deliberately slow)
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext password into a PHC-format string
    fn hash(&self, password: &str) -> Result<String>;

    /// Verify a plaintext password against a stored hash. Returns false
    /// for malformed hashes rather than erroring.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Argon2id hasher (production)
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String> {
        use argon2::password_hash::rand_core::OsRng;
        use argon2::password_hash::SaltString;
        use argon2::{Argon2, PasswordHasher};

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        use argon2::{Argon2, PasswordHash, PasswordVerifier};

        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::business::HASH_PREFIX;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hasher = Argon2Hasher;
        let hash = hasher.hash("open-sesame").unwrap();
        assert!(hash.starts_with(HASH_PREFIX));
        assert!(hasher.verify("open-sesame", &hash));
        assert!(!hasher.verify("wrong", &hash));
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        let hasher = Argon2Hasher;
        assert!(!hasher.verify("anything", "not-a-phc-string"));
    }
}
