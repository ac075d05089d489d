//! PostgreSQL-backed `IngredientRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{IngredientRepository, IngredientRepositoryError};
use crate::domain::{AttributeName, Ingredient, IngredientId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{IngredientRow, NewIngredientRow};
use super::pool::{DbPool, PoolError};
use super::schema::ingredients;

/// Diesel-backed implementation of the `IngredientRepository` port.
#[derive(Clone)]
pub struct DieselIngredientRepository {
    pool: DbPool,
}

impl DieselIngredientRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> IngredientRepositoryError {
    map_basic_pool_error(error, IngredientRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> IngredientRepositoryError {
    map_basic_diesel_error(
        error,
        IngredientRepositoryError::query,
        IngredientRepositoryError::connection,
    )
}

pub(super) fn row_to_ingredient(
    row: IngredientRow,
) -> Result<Ingredient, IngredientRepositoryError> {
    let name = AttributeName::new(&row.name).map_err(|err| {
        warn!(
            ingredient_id = row.id,
            error = %err,
            "stored ingredient name failed validation"
        );
        IngredientRepositoryError::query("stored ingredient name is invalid")
    })?;
    Ok(Ingredient::new(
        IngredientId::new(row.id),
        UserId::from_uuid(row.user_id),
        name,
    ))
}

#[async_trait]
impl IngredientRepository for DieselIngredientRepository {
    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Ingredient>, IngredientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<IngredientRow> = ingredients::table
            .filter(ingredients::user_id.eq(owner.as_uuid()))
            .order((ingredients::name.desc(), ingredients::id.desc()))
            .select(IngredientRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_ingredient).collect()
    }

    async fn create(
        &self,
        owner: &UserId,
        name: &AttributeName,
    ) -> Result<Ingredient, IngredientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: IngredientRow = diesel::insert_into(ingredients::table)
            .values(&NewIngredientRow {
                user_id: *owner.as_uuid(),
                name: name.as_ref(),
            })
            .returning(IngredientRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_ingredient(row)
    }
}
