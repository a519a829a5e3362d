//! Shared Diesel error mapping for the repositories in this module.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Whether `error` is a unique constraint violation (SQLSTATE 23505).
pub fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Map common Diesel error variants into query/connection constructors.
///
/// Raw driver messages are logged at debug level and replaced with fixed
/// descriptions so they never reach the domain.
pub fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            query("referenced record does not exist")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            query("value rejected by a check constraint")
        }
        _ => query("database error"),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::OpportunityRepositoryError;
    use rstest::rstest;

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(String::from("driver detail")))
    }

    fn map(error: DieselError) -> OpportunityRepositoryError {
        map_basic_diesel_error(
            error,
            OpportunityRepositoryError::query,
            OpportunityRepositoryError::connection,
        )
    }

    #[rstest]
    fn closed_connections_map_to_connection_errors() {
        assert_eq!(
            map(database_error(DatabaseErrorKind::ClosedConnection)),
            OpportunityRepositoryError::connection("database connection error")
        );
    }

    #[rstest]
    #[case(DieselError::NotFound, "record not found")]
    #[case(database_error(DatabaseErrorKind::ForeignKeyViolation), "referenced record does not exist")]
    #[case(database_error(DatabaseErrorKind::SerializationFailure), "database error")]
    fn other_failures_map_to_query_errors(#[case] error: DieselError, #[case] message: &str) {
        assert_eq!(map(error), OpportunityRepositoryError::query(message));
    }

    #[rstest]
    fn driver_details_are_not_forwarded() {
        let mapped = map(database_error(DatabaseErrorKind::NotNullViolation));
        assert!(!mapped.to_string().contains("driver detail"));
    }

    #[rstest]
    fn detects_unique_violations() {
        assert!(is_unique_violation(&database_error(
            DatabaseErrorKind::UniqueViolation
        )));
        assert!(!is_unique_violation(&DieselError::NotFound));
    }

    #[rstest]
    fn pool_errors_keep_their_message() {
        let mapped = map_basic_pool_error(
            PoolError::checkout("timed out"),
            OpportunityRepositoryError::connection,
        );
        assert_eq!(mapped, OpportunityRepositoryError::connection("timed out"));
    }
}
