//! Pure functions for mapping repository errors to HTTP status codes.
//!
//! This module provides HTTP status code mappings for [`RepositoryError`]
//! variants, following the Functional Core pattern - pure functions with no
//! side effects.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `AlreadyExists` -> 409 (Conflict)
/// - `DuplicateVote` -> 409 (Conflict)
/// - `StaleMenu` -> 400 (Bad Request)
/// - `InvariantViolation` -> 500 (Internal Server Error)
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - `QueryFailed` -> 500 (Internal Server Error)
/// - `Serialization` -> 500 (Internal Server Error)
/// - `InvalidData` -> 400 (Bad Request)
///
/// # Examples
///
/// ```
/// use lunchvote_core::storage::{repository_error_to_status_code, RepositoryError};
///
/// let error = RepositoryError::NotFound {
///     entity_type: "Menu",
///     id: "abc-123".to_string(),
/// };
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::DuplicateVote { .. } => 409,
        RepositoryError::StaleMenu { .. } => 400,
        RepositoryError::InvariantViolation(_) => 500,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) => 500,
        RepositoryError::Serialization(_) => 500,
        RepositoryError::InvalidData(_) => 400,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = RepositoryError::NotFound {
            entity_type: "Menu",
            id: "menu-123".to_string(),
        };
        assert_eq!(repository_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_already_exists_maps_to_409() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "Restaurant",
            id: "soup-palace".to_string(),
        };
        assert_eq!(repository_error_to_status_code(&error), 409);
    }

    #[test]
    fn test_duplicate_vote_maps_to_409() {
        let error = RepositoryError::DuplicateVote {
            employee_id: Uuid::nil(),
            day: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        };
        assert_eq!(repository_error_to_status_code(&error), 409);
    }

    #[test]
    fn test_stale_menu_maps_to_400() {
        let error = RepositoryError::StaleMenu {
            menu_id: Uuid::nil(),
            day: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        };
        assert_eq!(repository_error_to_status_code(&error), 400);
    }

    #[test]
    fn test_invariant_violation_maps_to_500() {
        let error = RepositoryError::InvariantViolation("count underflow".to_string());
        assert_eq!(repository_error_to_status_code(&error), 500);
    }

    #[test]
    fn test_connection_failed_maps_to_503() {
        let error = RepositoryError::ConnectionFailed("unreachable".to_string());
        assert_eq!(repository_error_to_status_code(&error), 503);
    }

    #[test]
    fn test_invalid_data_maps_to_400() {
        let error = RepositoryError::InvalidData("unknown restaurant".to_string());
        assert_eq!(repository_error_to_status_code(&error), 400);
    }
}
