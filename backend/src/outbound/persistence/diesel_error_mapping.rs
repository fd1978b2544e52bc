//! Shared Diesel error classification for the repositories.
//!
//! Each repository maps a [`DieselFailure`] onto its own port error, so the
//! logging and the constraint detection live in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Coarse classification of a Diesel failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection dropped mid-operation.
    Connection(&'static str),
    /// A unique constraint rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// A foreign key constraint rejected the write.
    ForeignKeyViolation { constraint: Option<String> },
    /// Any other query or database failure.
    Query(&'static str),
}

/// Extract the message from a pool error.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Classify a Diesel error and emit debug context.
pub(crate) fn classify_diesel_error(error: DieselError) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::ClosedConnection => {
                DieselFailure::Connection("database connection error")
            }
            DatabaseErrorKind::UniqueViolation => DieselFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            },
            DatabaseErrorKind::ForeignKeyViolation => DieselFailure::ForeignKeyViolation {
                constraint: info.constraint_name().map(str::to_owned),
            },
            _ => DieselFailure::Query("database error"),
        },
        _ => DieselFailure::Query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new("constraint failed".to_string()))
    }

    #[rstest]
    fn closed_connection_is_connection_failure() {
        let failure = classify_diesel_error(database_error(DatabaseErrorKind::ClosedConnection));
        assert!(matches!(failure, DieselFailure::Connection(_)));
    }

    #[rstest]
    fn unique_violation_is_classified() {
        let failure = classify_diesel_error(database_error(DatabaseErrorKind::UniqueViolation));
        assert_eq!(failure, DieselFailure::UniqueViolation { constraint: None });
    }

    #[rstest]
    fn foreign_key_violation_is_classified() {
        let failure = classify_diesel_error(database_error(DatabaseErrorKind::ForeignKeyViolation));
        assert_eq!(failure, DieselFailure::ForeignKeyViolation { constraint: None });
    }

    #[rstest]
    #[case(DieselError::NotFound, "record not found")]
    #[case(database_error(DatabaseErrorKind::CheckViolation), "database error")]
    fn other_errors_are_query_failures(#[case] error: DieselError, #[case] message: &'static str) {
        assert_eq!(classify_diesel_error(error), DieselFailure::Query(message));
    }

    #[rstest]
    fn pool_errors_keep_their_message() {
        assert_eq!(
            pool_error_message(PoolError::checkout("timed out")),
            "timed out"
        );
    }
}
