//! Port for owner-scoped ingredient persistence.

use async_trait::async_trait;

use crate::domain::{AttributeName, Ingredient, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ingredient repository adapters.
    pub enum IngredientRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "ingredient repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "ingredient repository query failed: {message}",
    }
}

/// Port for listing and creating a user's ingredients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Ingredients owned by `owner`, ordered by name descending (by code
    /// point), then id descending.
    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Ingredient>, IngredientRepositoryError>;

    /// Store a new ingredient for `owner`.
    async fn create(
        &self,
        owner: &UserId,
        name: &AttributeName,
    ) -> Result<Ingredient, IngredientRepositoryError>;
}
