use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Employee {employee_id} already voted on {day}")]
    DuplicateVote { employee_id: Uuid, day: NaiveDate },
    #[error("Menu {menu_id} is not from {day}")]
    StaleMenu { menu_id: Uuid, day: NaiveDate },
    #[error("Ledger invariant violated: {0}")]
    InvariantViolation(String),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
