//! Argon2id implementation of the `PasswordHasher` port.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    self, PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Hashes passwords with Argon2id default parameters and a random salt.
///
/// Hashes are stored as PHC strings, so parameters travel with each hash.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Hasher with the crate's default Argon2id parameters.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordHasherError::hash(err.to_string()))?;
        Ok(PasswordHash::new(hash.to_string()))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHasherError> {
        let parsed = PhcHash::new(hash.as_ref())
            .map_err(|err| PasswordHasherError::malformed_hash(err.to_string()))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHasherError::hash(err.to_string())),
        }
    }
}
