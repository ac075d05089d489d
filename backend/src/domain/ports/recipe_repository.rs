//! Port for owner-scoped recipe persistence.
//!
//! Every method takes the owning user explicitly; adapters must never
//! return or mutate another user's rows.

use async_trait::async_trait;

use crate::domain::{IngredientId, Recipe, RecipeDraft, RecipeId, TagId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by recipe repository adapters.
    pub enum RecipeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "recipe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "recipe repository query failed: {message}",
        /// Referenced tags do not exist or belong to another user.
        UnknownTags { ids: Vec<TagId> } =>
            "recipe references unknown tags: {ids:?}",
        /// Referenced ingredients do not exist or belong to another user.
        UnknownIngredients { ids: Vec<IngredientId> } =>
            "recipe references unknown ingredients: {ids:?}",
    }
}

/// Port for reading and creating recipes on behalf of their owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// All recipes owned by `owner`, newest (highest id) first.
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Recipe>, RecipeRepositoryError>;

    /// One recipe, or `None` when it is missing or owned by someone else.
    async fn find_for_owner(
        &self,
        owner: &UserId,
        id: RecipeId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// Store a new recipe and its associations atomically.
    ///
    /// Fails with [`RecipeRepositoryError::UnknownTags`] or
    /// [`RecipeRepositoryError::UnknownIngredients`] when any referenced id
    /// is not owned by `owner`; nothing is written in that case.
    async fn create(
        &self,
        owner: &UserId,
        draft: &RecipeDraft,
    ) -> Result<Recipe, RecipeRepositoryError>;
}
