//! SQLite storage backend implementation.
//!
//! This module provides a SQLite-based implementation of the repository
//! traits using `rusqlite` for synchronous operations and `tokio-rusqlite`
//! for async wrapping. The multi-row ledger operations run inside real
//! SQLite transactions, with the (employee, day) uniqueness enforced by a
//! store-level constraint.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
