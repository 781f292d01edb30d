//! Shared classification of Diesel failures for the repositories.
//!
//! Each repository owns its port error type; this module only decides which
//! bucket a Diesel error falls into so the mapping stays uniform.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// Coarse outcome of a failed Diesel operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum DieselFailure {
    /// The connection dropped mid-operation.
    Connection(&'static str),
    /// A unique constraint rejected the write.
    UniqueViolation,
    /// A foreign key rejected the write.
    ForeignKeyViolation,
    /// Anything else.
    Query(&'static str),
}

pub(super) fn classify_diesel_error(error: &DieselError) -> DieselFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DieselFailure::UniqueViolation
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            DieselFailure::ForeignKeyViolation
        }
        _ => DieselFailure::Query("database error"),
    }
}

/// Map a Diesel error onto a port error with only query and connection
/// variants. Constraint violations become query errors.
pub(super) fn map_basic_diesel_error<E, Q, C>(error: &DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => connection(message),
        DieselFailure::UniqueViolation => query("unique constraint violated"),
        DieselFailure::ForeignKeyViolation => query("referenced record does not exist"),
        DieselFailure::Query(message) => query(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::DatabaseErrorInformation;
    use rstest::rstest;

    struct Info;

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            "boom"
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
        DieselError::DatabaseError(kind, Box::new(Info))
    }

    #[rstest]
    #[case(database_error(DatabaseErrorKind::UniqueViolation), DieselFailure::UniqueViolation)]
    #[case(
        database_error(DatabaseErrorKind::ForeignKeyViolation),
        DieselFailure::ForeignKeyViolation
    )]
    #[case(
        database_error(DatabaseErrorKind::ClosedConnection),
        DieselFailure::Connection("database connection error")
    )]
    #[case(DieselError::NotFound, DieselFailure::Query("record not found"))]
    #[case(DieselError::RollbackTransaction, DieselFailure::Query("database error"))]
    fn classifies_errors(#[case] error: DieselError, #[case] expected: DieselFailure) {
        assert_eq!(classify_diesel_error(&error), expected);
    }

    #[rstest]
    fn basic_mapping_routes_connection_failures() {
        let error = database_error(DatabaseErrorKind::ClosedConnection);
        let mapped: (&str, &str) =
            map_basic_diesel_error(&error, |m| ("query", m), |m| ("connection", m));
        assert_eq!(mapped.0, "connection");
    }
}
