//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite repository,
//! following the Functional Core pattern - pure data, no I/O.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Restaurants table
CREATE TABLE IF NOT EXISTS restaurants (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

-- Menus table: one menu per restaurant per day
CREATE TABLE IF NOT EXISTS menus (
    id TEXT PRIMARY KEY,
    restaurant_id TEXT NOT NULL,
    day TEXT NOT NULL,
    name TEXT NOT NULL,
    details TEXT NOT NULL,
    vote_count INTEGER NOT NULL DEFAULT 0,
    UNIQUE (restaurant_id, day),
    FOREIGN KEY (restaurant_id) REFERENCES restaurants(id)
);

-- Votes table: one vote per employee per day
CREATE TABLE IF NOT EXISTS votes (
    id TEXT PRIMARY KEY,
    menu_id TEXT NOT NULL,
    employee_id TEXT NOT NULL,
    day TEXT NOT NULL,
    UNIQUE (employee_id, day),
    FOREIGN KEY (menu_id) REFERENCES menus(id)
);

-- Indexes for efficient queries
CREATE INDEX IF NOT EXISTS idx_menus_day ON menus(day);
CREATE INDEX IF NOT EXISTS idx_votes_menu_id ON votes(menu_id);
"#;

// Restaurant queries
pub const INSERT_RESTAURANT: &str = r#"
INSERT INTO restaurants (id, name)
VALUES (?1, ?2)
"#;

pub const SELECT_RESTAURANT_BY_ID: &str = r#"
SELECT id, name
FROM restaurants
WHERE id = ?1
"#;

pub const SELECT_ALL_RESTAURANTS: &str = r#"
SELECT id, name
FROM restaurants
"#;

// Menu queries
pub const INSERT_MENU: &str = r#"
INSERT INTO menus (id, restaurant_id, day, name, details, vote_count)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

pub const SELECT_MENU_BY_ID: &str = r#"
SELECT id, restaurant_id, day, name, details, vote_count
FROM menus
WHERE id = ?1
"#;

pub const SELECT_MENUS_BY_DAY: &str = r#"
SELECT id, restaurant_id, day, name, details, vote_count
FROM menus
WHERE day = ?1
"#;

pub const SELECT_MENU_DAY: &str = r#"
SELECT day
FROM menus
WHERE id = ?1
"#;

/// Unconditional increment; the row is known to exist inside transactions.
pub const INCREMENT_VOTE_COUNT: &str = r#"
UPDATE menus
SET vote_count = vote_count + 1
WHERE id = ?1
"#;

/// Guarded decrement: refuses to take the count below zero, so an
/// underflow surfaces as zero affected rows instead of a negative count.
pub const DECREMENT_VOTE_COUNT: &str = r#"
UPDATE menus
SET vote_count = vote_count - 1
WHERE id = ?1 AND vote_count > 0
"#;

// Vote queries
pub const INSERT_VOTE: &str = r#"
INSERT INTO votes (id, menu_id, employee_id, day)
VALUES (?1, ?2, ?3, ?4)
"#;

pub const SELECT_VOTE_BY_ID: &str = r#"
SELECT id, menu_id, employee_id, day
FROM votes
WHERE id = ?1
"#;

pub const UPDATE_VOTE_MENU: &str = r#"
UPDATE votes
SET menu_id = ?2
WHERE id = ?1
"#;

pub const COUNT_VOTES_FOR_MENU: &str = r#"
SELECT COUNT(*)
FROM votes
WHERE menu_id = ?1
"#;
