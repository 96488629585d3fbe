//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use chrono::NaiveDate;
use rusqlite::Row;
use uuid::Uuid;

use lunchvote_core::lunch::{Menu, Restaurant, Vote};

/// Convert a SQLite row to a Restaurant.
///
/// Expected columns: id, name
pub fn row_to_restaurant(row: &Row) -> rusqlite::Result<Restaurant> {
    let id: String = row.get(0)?;
    let name: String = row.get(1)?;

    Ok(Restaurant {
        id: parse_uuid(&id)?,
        name,
    })
}

/// Convert a SQLite row to a Menu.
///
/// Expected columns: id, restaurant_id, day, name, details, vote_count
pub fn row_to_menu(row: &Row) -> rusqlite::Result<Menu> {
    let id: String = row.get(0)?;
    let restaurant_id: String = row.get(1)?;
    let day: String = row.get(2)?;
    let name: String = row.get(3)?;
    let details: String = row.get(4)?;
    let vote_count: u32 = row.get(5)?;

    Ok(Menu {
        id: parse_uuid(&id)?,
        restaurant_id: parse_uuid(&restaurant_id)?,
        day: parse_date(&day)?,
        name,
        details,
        vote_count,
    })
}

/// Convert a SQLite row to a Vote.
///
/// Expected columns: id, menu_id, employee_id, day
pub fn row_to_vote(row: &Row) -> rusqlite::Result<Vote> {
    let id: String = row.get(0)?;
    let menu_id: String = row.get(1)?;
    let employee_id: String = row.get(2)?;
    let day: String = row.get(3)?;

    Ok(Vote {
        id: parse_uuid(&id)?,
        menu_id: parse_uuid(&menu_id)?,
        employee_id: parse_uuid(&employee_id)?,
        day: parse_date(&day)?,
    })
}

/// Parse a UUID from string.
fn parse_uuid(s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a date from ISO 8601 string (YYYY-MM-DD).
pub fn parse_date(s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Format a NaiveDate for SQLite storage (YYYY-MM-DD).
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_and_parse_date_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let formatted = format_date(&date);

        assert_eq!(formatted, "2024-06-15");
        assert_eq!(parse_date(&formatted).unwrap(), date);
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("June 15th").is_err());
    }
}
