//! Driving ports for tags and ingredients.

use async_trait::async_trait;

use crate::domain::{AttributeName, Error, Ingredient, Tag, UserId};

/// Use-case port for creating tags and ingredients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeAttributesCommand: Send + Sync {
    /// Create a tag owned by `owner`.
    async fn create_tag(&self, owner: &UserId, name: AttributeName) -> Result<Tag, Error>;

    /// Create an ingredient owned by `owner`.
    async fn create_ingredient(
        &self,
        owner: &UserId,
        name: AttributeName,
    ) -> Result<Ingredient, Error>;
}

/// Use-case port for listing tags and ingredients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeAttributesQuery: Send + Sync {
    /// Tags owned by `owner`, ordered by name descending.
    async fn list_tags(&self, owner: &UserId) -> Result<Vec<Tag>, Error>;

    /// Ingredients owned by `owner`, ordered by name descending.
    async fn list_ingredients(&self, owner: &UserId) -> Result<Vec<Ingredient>, Error>;
}
