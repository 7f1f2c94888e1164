use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use super::GeneratorError;

#[cfg_attr(test, mockall::automock)]
pub trait PasswordGenerator: Send + Sync {
    /// Hash `password` into a PHC string
    fn hash(&self, password: &str) -> Result<String, GeneratorError>;

    /// Check `password` against a stored hash.
    ///
    /// `Ok(false)` is a mismatch; `Err` means the stored hash is unusable.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, GeneratorError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordGenerator;

impl Argon2PasswordGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordGenerator for Argon2PasswordGenerator {
    fn hash(&self, password: &str) -> Result<String, GeneratorError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| GeneratorError::PasswordHash(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, GeneratorError> {
        let parsed =
            PasswordHash::new(hash).map_err(|e| GeneratorError::PasswordHash(e.to_string()))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(GeneratorError::PasswordHash(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let generator = Argon2PasswordGenerator::new();
        let hash = generator.hash("kelana sewandana").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(generator.verify("kelana sewandana", &hash).unwrap());
        assert!(!generator.verify("singo barong", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let generator = Argon2PasswordGenerator::new();
        assert_ne!(generator.hash("same").unwrap(), generator.hash("same").unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let generator = Argon2PasswordGenerator::new();
        assert!(matches!(
            generator.verify("secret", "not-a-phc-string"),
            Err(GeneratorError::PasswordHash(_))
        ));
    }
}
