use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::errors::InternalError;

/// Password hashing provider
///
/// Hashes are Argon2id PHC strings with a per-password random salt.
pub struct CryptoProvider {
    argon2: Argon2<'static>,

    /// Verified against when an email is unknown so both login failure paths
    /// cost one Argon2 verification
    dummy_hash: String,
}

impl CryptoProvider {
    pub fn new() -> Result<Self, InternalError> {
        let argon2 = Argon2::default();
        let salt = SaltString::generate(&mut OsRng);
        let dummy_hash = argon2
            .hash_password(b"tenant-console-dummy-password", &salt)
            .map_err(|e| InternalError::crypto("dummy_hash", e.to_string()))?
            .to_string();

        Ok(Self { argon2, dummy_hash })
    }

    /// Hash a plaintext password into a PHC string
    pub fn hash_password(&self, password: &str) -> Result<String, InternalError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| InternalError::crypto("hash_password", e.to_string()))
    }

    /// Check a plaintext password against a stored hash
    ///
    /// A malformed stored hash is an infrastructure error, a mismatch is `Ok(false)`.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, InternalError> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| InternalError::crypto("parse_password_hash", e.to_string()))?;
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Burn one verification for a login attempt with an unknown email
    pub fn verify_dummy(&self, password: &str) {
        let _ = self.verify_password(password, &self.dummy_hash);
    }
}
