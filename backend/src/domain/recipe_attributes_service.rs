//! Tag and ingredient domain services.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    IngredientRepository, IngredientRepositoryError, RecipeAttributesCommand,
    RecipeAttributesQuery, TagRepository, TagRepositoryError,
};
use crate::domain::{AttributeName, Error, Ingredient, Tag, UserId};

/// Service implementing both attribute driving ports.
#[derive(Clone)]
pub struct RecipeAttributesService<T, I> {
    tags: Arc<T>,
    ingredients: Arc<I>,
}

impl<T, I> RecipeAttributesService<T, I> {
    /// Create a new service with the given repositories.
    pub fn new(tags: Arc<T>, ingredients: Arc<I>) -> Self {
        Self { tags, ingredients }
    }
}

fn map_tag_error(error: TagRepositoryError) -> Error {
    match error {
        TagRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("tag repository unavailable: {message}"))
        }
        TagRepositoryError::Query { message } => {
            Error::internal(format!("tag repository error: {message}"))
        }
    }
}

fn map_ingredient_error(error: IngredientRepositoryError) -> Error {
    match error {
        IngredientRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("ingredient repository unavailable: {message}"))
        }
        IngredientRepositoryError::Query { message } => {
            Error::internal(format!("ingredient repository error: {message}"))
        }
    }
}

#[async_trait]
impl<T, I> RecipeAttributesCommand for RecipeAttributesService<T, I>
where
    T: TagRepository,
    I: IngredientRepository,
{
    async fn create_tag(&self, owner: &UserId, name: AttributeName) -> Result<Tag, Error> {
        self.tags.create(owner, &name).await.map_err(map_tag_error)
    }

    async fn create_ingredient(
        &self,
        owner: &UserId,
        name: AttributeName,
    ) -> Result<Ingredient, Error> {
        self.ingredients
            .create(owner, &name)
            .await
            .map_err(map_ingredient_error)
    }
}

#[async_trait]
impl<T, I> RecipeAttributesQuery for RecipeAttributesService<T, I>
where
    T: TagRepository,
    I: IngredientRepository,
{
    async fn list_tags(&self, owner: &UserId) -> Result<Vec<Tag>, Error> {
        self.tags.list_for_owner(owner).await.map_err(map_tag_error)
    }

    async fn list_ingredients(&self, owner: &UserId) -> Result<Vec<Ingredient>, Error> {
        self.ingredients
            .list_for_owner(owner)
            .await
            .map_err(map_ingredient_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::TagId;
    use crate::domain::ports::{MockIngredientRepository, MockTagRepository};
    use mockall::predicate::eq;

    fn service(
        tags: MockTagRepository,
        ingredients: MockIngredientRepository,
    ) -> RecipeAttributesService<MockTagRepository, MockIngredientRepository> {
        RecipeAttributesService::new(Arc::new(tags), Arc::new(ingredients))
    }

    #[tokio::test]
    async fn create_tag_delegates_to_repository() {
        let owner = UserId::random();
        let name = AttributeName::new("Vegan").expect("name");
        let tag = Tag::new(TagId::new(1), owner.clone(), name.clone());
        let returned = tag.clone();
        let mut tags = MockTagRepository::new();
        tags.expect_create()
            .with(eq(owner.clone()), eq(name.clone()))
            .times(1)
            .return_once(move |_, _| Ok(returned));

        let created = service(tags, MockIngredientRepository::new())
            .create_tag(&owner, name)
            .await
            .expect("create tag");
        assert_eq!(created, tag);
    }

    #[tokio::test]
    async fn query_failures_become_internal_errors() {
        let mut ingredients = MockIngredientRepository::new();
        ingredients
            .expect_list_for_owner()
            .times(1)
            .return_once(|_| Err(IngredientRepositoryError::query("syntax error")));

        let error = service(MockTagRepository::new(), ingredients)
            .list_ingredients(&UserId::random())
            .await
            .expect_err("query failure");
        assert_eq!(error.code(), ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn connection_failures_become_service_unavailable() {
        let mut tags = MockTagRepository::new();
        tags.expect_list_for_owner()
            .times(1)
            .return_once(|_| Err(TagRepositoryError::connection("refused")));

        let error = service(tags, MockIngredientRepository::new())
            .list_tags(&UserId::random())
            .await
            .expect_err("connection failure");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
