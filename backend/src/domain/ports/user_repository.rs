//! Port for user account persistence.

use async_trait::async_trait;

use crate::domain::{Email, PasswordHash, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses this email.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// A user together with the stored password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    /// Account the credentials belong to.
    pub user: User,
    /// PHC-encoded hash to verify passwords against.
    pub password_hash: PasswordHash,
}

/// Port for storing accounts and looking up their credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    async fn create(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user and password hash by login email.
    async fn find_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<StoredCredentials>, UserRepositoryError>;
}
