//! Argon2id password hashing with library-default cost parameters.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a plaintext password into a PHC-format string.
///
/// # Errors
/// Returns an error if hashing itself fails; salt generation and cost
/// parameters come from the library defaults.
pub fn hash_password(plaintext: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| anyhow!("failed to hash password: {err}"))
}

/// Verify a plaintext password against a stored hash.
///
/// Malformed stored hashes verify as `false` rather than erroring; a broken
/// row must not take the login path down with it.
#[must_use]
pub fn verify_password(plaintext: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() -> Result<()> {
        let hash = hash_password("correct horse battery staple")?;
        assert!(verify_password("correct horse battery staple", &hash));
        Ok(())
    }

    #[test]
    fn rejects_wrong_password() -> Result<()> {
        let hash = hash_password("correct horse battery staple")?;
        assert!(!verify_password("Tr0ub4dor&3", &hash));
        Ok(())
    }

    #[test]
    fn hashes_are_salted() -> Result<()> {
        let first = hash_password("same input")?;
        let second = hash_password("same input")?;
        assert_ne!(first, second);
        assert!(verify_password("same input", &first));
        assert!(verify_password("same input", &second));
        Ok(())
    }

    #[test]
    fn malformed_hash_verifies_false() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
        assert!(!verify_password("anything", "$argon2id$v=19$truncated"));
    }
}
