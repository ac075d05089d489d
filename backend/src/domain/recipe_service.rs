//! Recipe domain services.
//!
//! Implements [`RecipeCommand`] and [`RecipeQuery`] over a
//! [`RecipeRepository`], translating persistence failures into API errors.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{RecipeCommand, RecipeQuery, RecipeRepository, RecipeRepositoryError};
use crate::domain::{Error, Recipe, RecipeDraft, RecipeId, UserId};

fn map_repository_error(error: RecipeRepositoryError) -> Error {
    match error {
        RecipeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("recipe repository unavailable: {message}"))
        }
        RecipeRepositoryError::Query { message } => {
            Error::internal(format!("recipe repository error: {message}"))
        }
        RecipeRepositoryError::UnknownTags { ids } => {
            let ids: Vec<i64> = ids.into_iter().map(|id| id.get()).collect();
            Error::invalid_request("recipe references unknown tags").with_details(json!({
                "field": "tags",
                "code": "unknown_id",
                "ids": ids,
            }))
        }
        RecipeRepositoryError::UnknownIngredients { ids } => {
            let ids: Vec<i64> = ids.into_iter().map(|id| id.get()).collect();
            Error::invalid_request("recipe references unknown ingredients").with_details(json!({
                "field": "ingredients",
                "code": "unknown_id",
                "ids": ids,
            }))
        }
    }
}

/// Recipe write service implementing [`RecipeCommand`].
#[derive(Clone)]
pub struct RecipeCommandService<R> {
    repository: Arc<R>,
}

impl<R> RecipeCommandService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> RecipeCommand for RecipeCommandService<R>
where
    R: RecipeRepository,
{
    async fn create_recipe(&self, owner: &UserId, draft: RecipeDraft) -> Result<Recipe, Error> {
        let recipe = self
            .repository
            .create(owner, &draft)
            .await
            .map_err(map_repository_error)?;
        tracing::info!(recipe_id = %recipe.id(), owner = %owner, "recipe created");
        Ok(recipe)
    }
}

/// Recipe read service implementing [`RecipeQuery`].
#[derive(Clone)]
pub struct RecipeQueryService<R> {
    repository: Arc<R>,
}

impl<R> RecipeQueryService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> RecipeQuery for RecipeQueryService<R>
where
    R: RecipeRepository,
{
    async fn list_recipes(&self, owner: &UserId) -> Result<Vec<Recipe>, Error> {
        self.repository
            .list_for_owner(owner)
            .await
            .map_err(map_repository_error)
    }

    async fn get_recipe(&self, owner: &UserId, id: RecipeId) -> Result<Recipe, Error> {
        self.repository
            .find_for_owner(owner, id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("recipe {id} not found")))
    }
}

#[cfg(test)]
#[path = "recipe_service_tests.rs"]
mod tests;
