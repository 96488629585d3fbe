//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `RepositoryError`
//! from `lunchvote_core::storage`. Specific errors are mapped to semantic
//! variants (e.g., the votes UNIQUE constraint to DuplicateVote).

use chrono::NaiveDate;
use uuid::Uuid;

use lunchvote_core::storage::RepositoryError;

/// Maps a rusqlite error to a RepositoryError.
///
/// # Error Mapping
///
/// - `SQLITE_CONSTRAINT_UNIQUE` → `RepositoryError::AlreadyExists`
/// - `SQLITE_CONSTRAINT_FOREIGNKEY` → `RepositoryError::InvalidData`
/// - Connection errors → `RepositoryError::ConnectionFailed`
/// - `QueryReturnedNoRows` → `RepositoryError::NotFound`
/// - All other errors → `RepositoryError::QueryFailed`
fn map_rusqlite_error(
    err: &rusqlite::Error,
    entity_type: &'static str,
    id: &str,
) -> RepositoryError {
    match err {
        // Handle UNIQUE constraint violations (duplicate key)
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepositoryError::AlreadyExists {
                entity_type,
                id: id.to_string(),
            }
        }

        // Handle PRIMARY KEY constraint violations
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            RepositoryError::AlreadyExists {
                entity_type,
                id: id.to_string(),
            }
        }

        // Handle FOREIGN KEY constraint violations (invalid reference)
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
        {
            RepositoryError::InvalidData(format!(
                "Foreign key constraint violation for {entity_type}"
            ))
        }

        // Connection-related errors
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            RepositoryError::ConnectionFailed(format!("Cannot open database: {err}"))
        }

        // Query returned no rows (not found)
        rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
            entity_type,
            id: id.to_string(),
        },

        // All other errors
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error with a known ID to a RepositoryError.
///
/// This is the main entry point for error mapping in async code. It
/// extracts the inner `rusqlite::Error` if present, otherwise maps to a
/// generic `QueryFailed` error.
pub fn map_tokio_rusqlite_error(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    let id_str = id.into();
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => {
            map_rusqlite_error(rusqlite_err, entity_type, &id_str)
        }
        tokio_rusqlite::Error::Close(_) => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a cast-vote error, turning the votes uniqueness violation into the
/// ledger's `DuplicateVote` variant.
///
/// SQLite reports which constraint fired in the failure message
/// ("UNIQUE constraint failed: votes.employee_id, votes.day"), which is how
/// the (employee, day) conflict is told apart from other unique violations.
pub fn map_cast_vote_error(
    err: tokio_rusqlite::Error,
    employee_id: Uuid,
    day: NaiveDate,
) -> RepositoryError {
    if let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(sqlite_err, message)) =
        &err
    {
        if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
            && message
                .as_deref()
                .is_some_and(|m| m.contains("votes.employee_id"))
        {
            return RepositoryError::DuplicateVote { employee_id, day };
        }
    }
    map_tokio_rusqlite_error(err, "Vote", employee_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::ffi;

    fn unique_violation(message: &str) -> tokio_rusqlite::Error {
        let sqlite_err = rusqlite::ffi::Error {
            code: rusqlite::ErrorCode::ConstraintViolation,
            extended_code: ffi::SQLITE_CONSTRAINT_UNIQUE,
        };
        tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(
            sqlite_err,
            Some(message.to_string()),
        ))
    }

    #[test]
    fn test_unique_constraint_maps_to_already_exists() {
        let err = unique_violation("UNIQUE constraint failed: restaurants.name");

        let result = map_tokio_rusqlite_error(err, "Restaurant", "soup-palace");

        assert!(matches!(
            result,
            RepositoryError::AlreadyExists {
                entity_type: "Restaurant",
                ..
            }
        ));
    }

    #[test]
    fn test_foreign_key_maps_to_invalid_data() {
        let sqlite_err = rusqlite::ffi::Error {
            code: rusqlite::ErrorCode::ConstraintViolation,
            extended_code: ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
        };
        let err =
            tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(sqlite_err, None));

        let result = map_tokio_rusqlite_error(err, "Menu", "abc");

        assert!(matches!(result, RepositoryError::InvalidData(_)));
    }

    #[test]
    fn test_no_rows_maps_to_not_found() {
        let err = tokio_rusqlite::Error::Rusqlite(rusqlite::Error::QueryReturnedNoRows);

        let result = map_tokio_rusqlite_error(err, "Menu", "abc-123");

        match result {
            RepositoryError::NotFound { entity_type, id } => {
                assert_eq!(entity_type, "Menu");
                assert_eq!(id, "abc-123");
            }
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_votes_unique_violation_maps_to_duplicate_vote() {
        let employee_id = Uuid::new_v4();
        let day = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let err = unique_violation("UNIQUE constraint failed: votes.employee_id, votes.day");

        let result = map_cast_vote_error(err, employee_id, day);

        assert_eq!(result, RepositoryError::DuplicateVote { employee_id, day });
    }

    #[test]
    fn test_other_unique_violation_is_not_duplicate_vote() {
        let employee_id = Uuid::new_v4();
        let day = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let err = unique_violation("UNIQUE constraint failed: votes.id");

        let result = map_cast_vote_error(err, employee_id, day);

        assert!(matches!(result, RepositoryError::AlreadyExists { .. }));
    }

    #[test]
    fn test_generic_error_maps_to_query_failed() {
        let err = tokio_rusqlite::Error::Other(Box::new(std::io::Error::other("test error")));

        let result = map_tokio_rusqlite_error(err, "Vote", "abc");

        assert!(matches!(result, RepositoryError::QueryFailed(_)));
    }
}
