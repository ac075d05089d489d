//! In-memory adapters for every persistence port.
//!
//! Used when no database URL is configured and by the HTTP tests. A single
//! [`InMemoryStore`] implements the user, tag, ingredient, and recipe
//! repositories over one mutex so cross-entity checks (recipe associations)
//! see a consistent snapshot, matching the transactional Diesel adapter.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    IngredientRepository, IngredientRepositoryError, RecipeRepository, RecipeRepositoryError,
    StoredCredentials, TagRepository, TagRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    AttributeName, Email, Ingredient, IngredientId, PasswordHash, Recipe, RecipeDraft, RecipeId,
    RecipeParts, Tag, TagId, User, UserId,
};

#[derive(Debug, Clone)]
struct StoredRecipe {
    owner: UserId,
    draft: RecipeDraft,
}

#[derive(Debug, Default)]
struct State {
    users: HashMap<UserId, StoredCredentials>,
    tags: BTreeMap<TagId, Tag>,
    ingredients: BTreeMap<IngredientId, Ingredient>,
    recipes: BTreeMap<RecipeId, StoredRecipe>,
    last_tag_id: i64,
    last_ingredient_id: i64,
    last_recipe_id: i64,
}

impl State {
    fn hydrate(&self, id: RecipeId, stored: &StoredRecipe) -> Recipe {
        let tags = stored
            .draft
            .tag_ids()
            .iter()
            .filter_map(|tag_id| self.tags.get(tag_id).cloned())
            .collect();
        let ingredients = stored
            .draft
            .ingredient_ids()
            .iter()
            .filter_map(|ingredient_id| self.ingredients.get(ingredient_id).cloned())
            .collect();
        Recipe::from_parts(RecipeParts {
            id,
            owner: stored.owner.clone(),
            title: stored.draft.title().clone(),
            time_minutes: stored.draft.time_minutes(),
            price: stored.draft.price(),
            link: stored.draft.link().clone(),
            tags,
            ingredients,
        })
    }
}

/// Process-local store implementing the persistence ports.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // Mutations are single inserts, so a poisoned state is still whole.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Sort by name descending, then id descending.
///
/// Names compare by code point, matching the `COLLATE "C"` label columns
/// in PostgreSQL, so `"apple"` sorts before `"Banana"`.
fn sort_by_name_desc<T, K: Ord>(items: &mut [T], key: impl Fn(&T) -> (String, K)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserRepositoryError> {
        let mut state = self.lock();
        if state
            .users
            .values()
            .any(|stored| stored.user.email() == user.email())
        {
            return Err(UserRepositoryError::duplicate_email(user.email().as_ref()));
        }
        state.users.insert(
            user.id().clone(),
            StoredCredentials {
                user: user.clone(),
                password_hash: password_hash.clone(),
            },
        );
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.lock().users.get(id).map(|stored| stored.user.clone()))
    }

    async fn find_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<StoredCredentials>, UserRepositoryError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|stored| stored.user.email() == email)
            .cloned())
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Tag>, TagRepositoryError> {
        let mut tags: Vec<Tag> = self
            .lock()
            .tags
            .values()
            .filter(|tag| tag.owner() == owner)
            .cloned()
            .collect();
        sort_by_name_desc(&mut tags, |tag| (tag.name().to_string(), tag.id()));
        Ok(tags)
    }

    async fn create(
        &self,
        owner: &UserId,
        name: &AttributeName,
    ) -> Result<Tag, TagRepositoryError> {
        let mut state = self.lock();
        state.last_tag_id += 1;
        let tag = Tag::new(TagId::new(state.last_tag_id), owner.clone(), name.clone());
        state.tags.insert(tag.id(), tag.clone());
        Ok(tag)
    }
}

#[async_trait]
impl IngredientRepository for InMemoryStore {
    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Ingredient>, IngredientRepositoryError> {
        let mut ingredients: Vec<Ingredient> = self
            .lock()
            .ingredients
            .values()
            .filter(|ingredient| ingredient.owner() == owner)
            .cloned()
            .collect();
        sort_by_name_desc(&mut ingredients, |ingredient| {
            (ingredient.name().to_string(), ingredient.id())
        });
        Ok(ingredients)
    }

    async fn create(
        &self,
        owner: &UserId,
        name: &AttributeName,
    ) -> Result<Ingredient, IngredientRepositoryError> {
        let mut state = self.lock();
        state.last_ingredient_id += 1;
        let ingredient = Ingredient::new(
            IngredientId::new(state.last_ingredient_id),
            owner.clone(),
            name.clone(),
        );
        state.ingredients.insert(ingredient.id(), ingredient.clone());
        Ok(ingredient)
    }
}

#[async_trait]
impl RecipeRepository for InMemoryStore {
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let state = self.lock();
        Ok(state
            .recipes
            .iter()
            .rev()
            .filter(|(_, stored)| &stored.owner == owner)
            .map(|(id, stored)| state.hydrate(*id, stored))
            .collect())
    }

    async fn find_for_owner(
        &self,
        owner: &UserId,
        id: RecipeId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let state = self.lock();
        Ok(state
            .recipes
            .get(&id)
            .filter(|stored| &stored.owner == owner)
            .map(|stored| state.hydrate(id, stored)))
    }

    async fn create(
        &self,
        owner: &UserId,
        draft: &RecipeDraft,
    ) -> Result<Recipe, RecipeRepositoryError> {
        let mut state = self.lock();

        let unknown_tags: Vec<TagId> = draft
            .tag_ids()
            .iter()
            .filter(|id| state.tags.get(*id).is_none_or(|tag| tag.owner() != owner))
            .copied()
            .collect();
        if !unknown_tags.is_empty() {
            return Err(RecipeRepositoryError::unknown_tags(unknown_tags));
        }
        let unknown_ingredients: Vec<IngredientId> = draft
            .ingredient_ids()
            .iter()
            .filter(|id| {
                state
                    .ingredients
                    .get(*id)
                    .is_none_or(|ingredient| ingredient.owner() != owner)
            })
            .copied()
            .collect();
        if !unknown_ingredients.is_empty() {
            return Err(RecipeRepositoryError::unknown_ingredients(
                unknown_ingredients,
            ));
        }

        state.last_recipe_id += 1;
        let id = RecipeId::new(state.last_recipe_id);
        let stored = StoredRecipe {
            owner: owner.clone(),
            draft: draft.clone(),
        };
        let recipe = state.hydrate(id, &stored);
        state.recipes.insert(id, stored);
        Ok(recipe)
    }
}
