//! Port for one-way password hashing.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum PasswordHasherError {
        /// Hashing the password failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Hashes new passwords and checks candidates against stored hashes.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted hash of `password`.
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError>;

    /// Return whether `password` matches `hash`.
    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHasherError>;
}
