//! Account services: registration, login, and profile lookup.
//!
//! One service backs three driving ports so the password hasher and the
//! user repository are wired once.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    LoginService, PasswordHasher, PasswordHasherError, UserProfileQuery, UserRegistration,
    UserRepository, UserRepositoryError,
};
use crate::domain::{Error, LoginCredentials, Registration, User, UserId};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Service implementing [`LoginService`], [`UserRegistration`], and
/// [`UserProfileQuery`].
#[derive(Clone)]
pub struct UserAccountsService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> UserAccountsService<U, H> {
    /// Create a new service over the given repository and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateEmail { .. } => {
            Error::conflict("a user with this email already exists")
        }
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl<U, H> LoginService for UserAccountsService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let Some(stored) = self
            .users
            .find_credentials(credentials.email())
            .await
            .map_err(map_repository_error)?
        else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .map_err(map_hasher_error)?;
        if !matches {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(stored.user.id().clone())
    }
}

#[async_trait]
impl<U, H> UserRegistration for UserAccountsService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let hash = self
            .hasher
            .hash(registration.password())
            .map_err(map_hasher_error)?;
        let user = User::new(
            UserId::random(),
            registration.email().clone(),
            registration.name().clone(),
        );
        self.users
            .create(&user, &hash)
            .await
            .map_err(map_repository_error)?;
        tracing::info!(user_id = %user.id(), "user registered");
        Ok(user)
    }
}

#[async_trait]
impl<U, H> UserProfileQuery for UserAccountsService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::unauthorized("session user no longer exists"))
    }
}

#[cfg(test)]
#[path = "user_accounts_service_tests.rs"]
mod tests;
