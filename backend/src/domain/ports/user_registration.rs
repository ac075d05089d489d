//! Driving port for opening accounts.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User};

/// Domain use-case port for registering users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Create an account; fails with `conflict` when the email is taken.
    async fn register(&self, registration: Registration) -> Result<User, Error>;
}
