//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{StoredCredentials, UserRepository, UserRepositoryError};
use crate::domain::{Email, PasswordHash, User, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Unique index guarding normalised emails.
const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_basic_pool_error(error, UserRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_basic_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

fn row_to_credentials(row: UserRow) -> Result<StoredCredentials, UserRepositoryError> {
    let user = User::try_from_strings(row.id.to_string(), &row.email, &row.name).map_err(|err| {
        warn!(user_id = %row.id, error = %err, "stored user failed validation");
        UserRepositoryError::query("stored user record is invalid")
    })?;
    Ok(StoredCredentials {
        user,
        password_hash: PasswordHash::new(row.password_hash),
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: *user.id().as_uuid(),
            email: user.email().as_ref(),
            name: user.name().as_ref(),
            password_hash: password_hash.as_ref(),
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err, EMAIL_UNIQUE_CONSTRAINT) {
                    UserRepositoryError::duplicate_email(user.email().as_ref())
                } else {
                    map_diesel_error(err)
                }
            })
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|row| row_to_credentials(row).map(|stored| stored.user))
            .transpose()
    }

    async fn find_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<StoredCredentials>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_credentials).transpose()
    }
}
