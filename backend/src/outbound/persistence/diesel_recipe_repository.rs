//! PostgreSQL-backed `RecipeRepository` implementation using Diesel ORM.
//!
//! Creation runs in one transaction: referenced tags and ingredients are
//! checked against the owner, then the recipe row and both join tables are
//! written. Any failure rolls the whole write back.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{
    AttributeName, Ingredient, IngredientId, PreparationMinutes, Price, Recipe, RecipeDraft,
    RecipeId, RecipeLink, RecipeParts, RecipeTitle, Tag, TagId, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{
    IngredientRow, NewRecipeRow, RecipeIngredientRow, RecipeRow, RecipeTagRow, TagRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{ingredients, recipe_ingredients, recipe_tags, recipes, tags};

/// Diesel-backed implementation of the `RecipeRepository` port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecipeRepositoryError {
    map_basic_pool_error(error, RecipeRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RecipeRepositoryError {
    map_basic_diesel_error(
        error,
        RecipeRepositoryError::query,
        RecipeRepositoryError::connection,
    )
}

/// Failure inside the create transaction.
#[derive(Debug)]
enum CreateFailure {
    Diesel(diesel::result::Error),
    UnknownTags(Vec<TagId>),
    UnknownIngredients(Vec<IngredientId>),
}

impl From<diesel::result::Error> for CreateFailure {
    fn from(value: diesel::result::Error) -> Self {
        Self::Diesel(value)
    }
}

impl From<CreateFailure> for RecipeRepositoryError {
    fn from(value: CreateFailure) -> Self {
        match value {
            CreateFailure::Diesel(err) => map_diesel_error(err),
            CreateFailure::UnknownTags(ids) => Self::unknown_tags(ids),
            CreateFailure::UnknownIngredients(ids) => Self::unknown_ingredients(ids),
        }
    }
}

/// Requested ids absent from `found`, in ascending order.
fn missing_ids(requested: &[i64], found: impl IntoIterator<Item = i64>) -> Vec<i64> {
    let found: BTreeSet<i64> = found.into_iter().collect();
    requested
        .iter()
        .copied()
        .filter(|id| !found.contains(id))
        .collect()
}

fn invalid_row(recipe_id: i64, err: impl std::fmt::Display) -> RecipeRepositoryError {
    warn!(recipe_id, error = %err, "stored recipe failed validation");
    RecipeRepositoryError::query("stored recipe record is invalid")
}

fn row_to_tag(recipe_id: i64, row: TagRow) -> Result<Tag, RecipeRepositoryError> {
    let name = AttributeName::new(&row.name).map_err(|err| invalid_row(recipe_id, err))?;
    Ok(Tag::new(TagId::new(row.id), UserId::from_uuid(row.user_id), name))
}

fn row_to_ingredient(
    recipe_id: i64,
    row: IngredientRow,
) -> Result<Ingredient, RecipeRepositoryError> {
    let name = AttributeName::new(&row.name).map_err(|err| invalid_row(recipe_id, err))?;
    Ok(Ingredient::new(
        IngredientId::new(row.id),
        UserId::from_uuid(row.user_id),
        name,
    ))
}

fn assemble(
    row: RecipeRow,
    tag_rows: Vec<TagRow>,
    ingredient_rows: Vec<IngredientRow>,
) -> Result<Recipe, RecipeRepositoryError> {
    let id = row.id;
    let tags = tag_rows
        .into_iter()
        .map(|tag| row_to_tag(id, tag))
        .collect::<Result<Vec<_>, _>>()?;
    let ingredients = ingredient_rows
        .into_iter()
        .map(|ingredient| row_to_ingredient(id, ingredient))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Recipe::from_parts(RecipeParts {
        id: RecipeId::new(id),
        owner: UserId::from_uuid(row.user_id),
        title: RecipeTitle::new(&row.title).map_err(|err| invalid_row(id, err))?,
        time_minutes: PreparationMinutes::new(i64::from(row.time_minutes))
            .map_err(|err| invalid_row(id, err))?,
        price: Price::new(row.price).map_err(|err| invalid_row(id, err))?,
        link: RecipeLink::new(&row.link).map_err(|err| invalid_row(id, err))?,
        tags,
        ingredients,
    }))
}

/// Load the tags and ingredients attached to each of `recipe_ids`.
async fn load_associations<C>(
    conn: &mut C,
    recipe_ids: &[i64],
) -> QueryResult<(HashMap<i64, Vec<TagRow>>, HashMap<i64, Vec<IngredientRow>>)>
where
    C: AsyncConnection<Backend = Pg> + Send,
{
    let tag_links: Vec<(i64, TagRow)> = recipe_tags::table
        .inner_join(tags::table)
        .filter(recipe_tags::recipe_id.eq_any(recipe_ids))
        .select((recipe_tags::recipe_id, TagRow::as_select()))
        .load(conn)
        .await?;
    let ingredient_links: Vec<(i64, IngredientRow)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq_any(recipe_ids))
        .select((recipe_ingredients::recipe_id, IngredientRow::as_select()))
        .load(conn)
        .await?;

    let mut tags_by_recipe: HashMap<i64, Vec<TagRow>> = HashMap::new();
    for (recipe_id, tag) in tag_links {
        tags_by_recipe.entry(recipe_id).or_default().push(tag);
    }
    let mut ingredients_by_recipe: HashMap<i64, Vec<IngredientRow>> = HashMap::new();
    for (recipe_id, ingredient) in ingredient_links {
        ingredients_by_recipe
            .entry(recipe_id)
            .or_default()
            .push(ingredient);
    }
    Ok((tags_by_recipe, ingredients_by_recipe))
}

/// Attach loaded associations to recipe rows, preserving row order.
async fn hydrate<C>(
    conn: &mut C,
    rows: Vec<RecipeRow>,
) -> Result<Vec<Recipe>, RecipeRepositoryError>
where
    C: AsyncConnection<Backend = Pg> + Send,
{
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let (mut tags_by_recipe, mut ingredients_by_recipe) = load_associations(conn, &ids)
        .await
        .map_err(map_diesel_error)?;

    rows.into_iter()
        .map(|row| {
            let tags = tags_by_recipe.remove(&row.id).unwrap_or_default();
            let ingredients = ingredients_by_recipe.remove(&row.id).unwrap_or_default();
            assemble(row, tags, ingredients)
        })
        .collect()
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RecipeRow> = recipes::table
            .filter(recipes::user_id.eq(owner.as_uuid()))
            .order(recipes::id.desc())
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        hydrate(&mut conn, rows).await
    }

    async fn find_for_owner(
        &self,
        owner: &UserId,
        id: RecipeId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RecipeRow> = recipes::table
            .filter(recipes::id.eq(id.get()))
            .filter(recipes::user_id.eq(owner.as_uuid()))
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(hydrate(&mut conn, vec![row]).await?.pop())
    }

    async fn create(
        &self,
        owner: &UserId,
        draft: &RecipeDraft,
    ) -> Result<Recipe, RecipeRepositoryError> {
        let owner_id: Uuid = *owner.as_uuid();
        let tag_ids: Vec<i64> = draft.tag_ids().iter().map(|id| id.get()).collect();
        let ingredient_ids: Vec<i64> = draft.ingredient_ids().iter().map(|id| id.get()).collect();
        let new_row = NewRecipeRow {
            user_id: owner_id,
            title: draft.title().as_ref(),
            time_minutes: draft.time_minutes().get(),
            price: draft.price().amount(),
            link: draft.link().as_ref(),
        };
        let (tag_ids, ingredient_ids, new_row) = (&tag_ids, &ingredient_ids, &new_row);

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (row, tag_rows, ingredient_rows) = conn
            .transaction(|conn| {
                async move {
                    let tag_rows: Vec<TagRow> = if tag_ids.is_empty() {
                        Vec::new()
                    } else {
                        tags::table
                            .filter(tags::user_id.eq(owner_id))
                            .filter(tags::id.eq_any(tag_ids))
                            .select(TagRow::as_select())
                            .load(conn)
                            .await?
                    };
                    let missing = missing_ids(tag_ids, tag_rows.iter().map(|row| row.id));
                    if !missing.is_empty() {
                        return Err(CreateFailure::UnknownTags(
                            missing.into_iter().map(TagId::new).collect(),
                        ));
                    }

                    let ingredient_rows: Vec<IngredientRow> = if ingredient_ids.is_empty() {
                        Vec::new()
                    } else {
                        ingredients::table
                            .filter(ingredients::user_id.eq(owner_id))
                            .filter(ingredients::id.eq_any(ingredient_ids))
                            .select(IngredientRow::as_select())
                            .load(conn)
                            .await?
                    };
                    let missing =
                        missing_ids(ingredient_ids, ingredient_rows.iter().map(|row| row.id));
                    if !missing.is_empty() {
                        return Err(CreateFailure::UnknownIngredients(
                            missing.into_iter().map(IngredientId::new).collect(),
                        ));
                    }

                    let row: RecipeRow = diesel::insert_into(recipes::table)
                        .values(new_row)
                        .returning(RecipeRow::as_returning())
                        .get_result(conn)
                        .await?;

                    if !tag_ids.is_empty() {
                        let links: Vec<RecipeTagRow> = tag_ids
                            .iter()
                            .map(|&tag_id| RecipeTagRow {
                                recipe_id: row.id,
                                tag_id,
                            })
                            .collect();
                        diesel::insert_into(recipe_tags::table)
                            .values(&links)
                            .execute(conn)
                            .await?;
                    }
                    if !ingredient_ids.is_empty() {
                        let links: Vec<RecipeIngredientRow> = ingredient_ids
                            .iter()
                            .map(|&ingredient_id| RecipeIngredientRow {
                                recipe_id: row.id,
                                ingredient_id,
                            })
                            .collect();
                        diesel::insert_into(recipe_ingredients::table)
                            .values(&links)
                            .execute(conn)
                            .await?;
                    }

                    Ok((row, tag_rows, ingredient_rows))
                }
                .scope_boxed()
            })
            .await?;

        assemble(row, tag_rows, ingredient_rows)
    }
}
