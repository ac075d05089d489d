//! PostgreSQL-backed `TagRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{TagRepository, TagRepositoryError};
use crate::domain::{AttributeName, Tag, TagId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewTagRow, TagRow};
use super::pool::{DbPool, PoolError};
use super::schema::tags;

/// Diesel-backed implementation of the `TagRepository` port.
#[derive(Clone)]
pub struct DieselTagRepository {
    pool: DbPool,
}

impl DieselTagRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TagRepositoryError {
    map_basic_pool_error(error, TagRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TagRepositoryError {
    map_basic_diesel_error(
        error,
        TagRepositoryError::query,
        TagRepositoryError::connection,
    )
}

pub(super) fn row_to_tag(row: TagRow) -> Result<Tag, TagRepositoryError> {
    let name = AttributeName::new(&row.name).map_err(|err| {
        warn!(tag_id = row.id, error = %err, "stored tag name failed validation");
        TagRepositoryError::query("stored tag name is invalid")
    })?;
    Ok(Tag::new(TagId::new(row.id), UserId::from_uuid(row.user_id), name))
}

#[async_trait]
impl TagRepository for DieselTagRepository {
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Tag>, TagRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TagRow> = tags::table
            .filter(tags::user_id.eq(owner.as_uuid()))
            .order((tags::name.desc(), tags::id.desc()))
            .select(TagRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_tag).collect()
    }

    async fn create(
        &self,
        owner: &UserId,
        name: &AttributeName,
    ) -> Result<Tag, TagRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: TagRow = diesel::insert_into(tags::table)
            .values(&NewTagRow {
                user_id: *owner.as_uuid(),
                name: name.as_ref(),
            })
            .returning(TagRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_tag(row)
    }
}
