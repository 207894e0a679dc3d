//! Translation of pool and Diesel failures into repository errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::RecipeRepositoryError;

use super::pool::PoolError;

/// Pool failures mean the store is unreachable.
pub(crate) fn map_pool_error(error: PoolError) -> RecipeRepositoryError {
    debug!(%error, "connection checkout failed");
    RecipeRepositoryError::connection(error.message())
}

/// Closed connections are connection errors; every other Diesel failure is a
/// query error. Driver detail goes to the debug log only.
pub(crate) fn map_diesel_error(error: DieselError) -> RecipeRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            RecipeRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            RecipeRepositoryError::query("database constraint violated")
        }
        DieselError::NotFound => RecipeRepositoryError::query("record not found"),
        _ => RecipeRepositoryError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[derive(Debug)]
    struct Info(&'static str);

    impl diesel::result::DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info("boom")))
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let error = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(error, RecipeRepositoryError::Connection { .. }));
        assert!(error.to_string().contains("connection refused"));
    }

    #[rstest]
    #[case(database_error(DatabaseErrorKind::ClosedConnection), true)]
    #[case(DieselError::BrokenTransactionManager, true)]
    #[case(database_error(DatabaseErrorKind::CheckViolation), false)]
    #[case(database_error(DatabaseErrorKind::ForeignKeyViolation), false)]
    #[case(DieselError::NotFound, false)]
    fn diesel_errors_are_classified(#[case] error: DieselError, #[case] is_connection: bool) {
        let mapped = map_diesel_error(error);
        assert_eq!(
            matches!(mapped, RecipeRepositoryError::Connection { .. }),
            is_connection
        );
    }

    #[rstest]
    fn driver_messages_are_not_forwarded() {
        let mapped = map_diesel_error(database_error(DatabaseErrorKind::Unknown));
        assert!(!mapped.to_string().contains("boom"));
    }
}
