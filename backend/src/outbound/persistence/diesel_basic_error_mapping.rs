//! Shared Diesel error mapping for the recipe repositories.
//!
//! Every repository port exposes `Connection` and `Query` variants; these
//! helpers map pool and Diesel failures onto them via the port's own
//! constructors. Database detail is logged at debug level and never
//! forwarded in the returned message.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    connection(error.into_message())
}

/// Map common Diesel error variants into query/connection constructors.
pub fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    log_diesel_error(&error);

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::BrokenTransactionManager => connection("database transaction state lost"),
        _ => query("database error"),
    }
}

/// Whether `error` is a unique-constraint violation on `constraint`.
pub fn is_unique_violation(error: &DieselError, constraint: &str) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
            if info.constraint_name() == Some(constraint)
    )
}

fn log_diesel_error(error: &DieselError) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            "diesel operation failed"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(String),
    }

    fn map(error: DieselError) -> Mapped {
        map_basic_diesel_error(error, Mapped::Query, |message| {
            Mapped::Connection(message.to_owned())
        })
    }

    #[rstest]
    fn not_found_maps_to_query() {
        assert_eq!(map(DieselError::NotFound), Mapped::Query("record not found"));
    }

    #[rstest]
    fn broken_transaction_maps_to_connection() {
        assert_eq!(
            map(DieselError::BrokenTransactionManager),
            Mapped::Connection("database transaction state lost".to_owned())
        );
    }

    #[rstest]
    fn pool_errors_map_to_connection() {
        let mapped: Mapped =
            map_basic_pool_error(PoolError::checkout("timed out"), Mapped::Connection);
        assert_eq!(mapped, Mapped::Connection("timed out".to_owned()));
    }

    #[rstest]
    fn not_found_is_not_a_unique_violation() {
        assert!(!is_unique_violation(&DieselError::NotFound, "users_email_key"));
    }
}
