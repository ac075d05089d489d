//! Driving port for recipe writes.

use async_trait::async_trait;

use crate::domain::{Error, Recipe, RecipeDraft, UserId};

/// Use-case port for creating recipes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeCommand: Send + Sync {
    /// Create a recipe owned by `owner` and return it with associations resolved.
    async fn create_recipe(&self, owner: &UserId, draft: RecipeDraft) -> Result<Recipe, Error>;
}
