//! Driving port for recipe reads.
//!
//! Both operations are scoped to the caller: foreign recipes are
//! indistinguishable from missing ones.

use async_trait::async_trait;

use crate::domain::{Error, Recipe, RecipeId, UserId};

/// Use-case port for listing and retrieving recipes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeQuery: Send + Sync {
    /// Recipes owned by `owner`, newest first.
    async fn list_recipes(&self, owner: &UserId) -> Result<Vec<Recipe>, Error>;

    /// A single recipe owned by `owner`, or `not_found`.
    async fn get_recipe(&self, owner: &UserId, id: RecipeId) -> Result<Recipe, Error>;
}
