//! Port for owner-scoped tag persistence.

use async_trait::async_trait;

use crate::domain::{AttributeName, Tag, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by tag repository adapters.
    pub enum TagRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "tag repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "tag repository query failed: {message}",
    }
}

/// Port for listing and creating a user's tags.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Tags owned by `owner`, ordered by name descending (by code point),
    /// then id descending.
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Tag>, TagRepositoryError>;

    /// Store a new tag for `owner`.
    async fn create(&self, owner: &UserId, name: &AttributeName) -> Result<Tag, TagRepositoryError>;
}
