//! SQLite repository implementation.
//!
//! Implements the repository traits from `lunchvote_core::storage` using
//! SQLite. The ledger mutations (`cast_vote`, `move_vote`) run inside
//! SQLite transactions: either every touched row commits or none does, and
//! the (employee, day) uniqueness is enforced by the store's UNIQUE
//! constraint rather than an application-level check.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio_rusqlite::Connection;
use uuid::Uuid;

use lunchvote_core::lunch::{Menu, Restaurant, Vote};
use lunchvote_core::storage::{
    MenuRepository, RepositoryError, RestaurantRepository, Result, VoteRepository,
};

use super::conversions::{format_date, parse_date, row_to_menu, row_to_restaurant, row_to_vote};
use super::error::{map_cast_vote_error, map_tokio_rusqlite_error};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Outcome of the cast-vote transaction body.
enum CastStatus {
    Cast,
    MenuMissing,
    WrongDay,
}

/// Outcome of the move-vote transaction body.
enum MoveStatus {
    Moved(Vote),
    VoteMissing,
    MenuMissing,
    WrongDay(NaiveDate),
    Underflow(Uuid),
}

/// Outcome of a standalone decrement.
enum DecrementStatus {
    Decremented,
    Missing,
    WouldGoNegative,
}

/// SQLite-based repository implementation.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist. Schema
    /// tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch("PRAGMA foreign_keys = ON;")
                .map_err(wrap_err)?;
            conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    /// Looks up a menu's day inside a transaction-scoped connection.
    fn menu_day(
        conn: &rusqlite::Connection,
        menu_id: &str,
    ) -> std::result::Result<Option<String>, tokio_rusqlite::Error> {
        match conn.query_row(schema::SELECT_MENU_DAY, [menu_id], |row| {
            row.get::<_, String>(0)
        }) {
            Ok(day) => Ok(Some(day)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(wrap_err(e)),
        }
    }
}

// ============================================================================
// RestaurantRepository implementation
// ============================================================================

#[async_trait]
impl RestaurantRepository for SqliteRepository {
    async fn get_restaurant(&self, id: Uuid) -> Result<Option<Restaurant>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_RESTAURANT_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_restaurant) {
                    Ok(restaurant) => Ok(Some(restaurant)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Restaurant", id.to_string()))
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_ALL_RESTAURANTS)
                    .map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_restaurant).map_err(wrap_err)?;

                let mut restaurants = Vec::new();
                for row_result in rows {
                    restaurants.push(row_result.map_err(wrap_err)?);
                }
                Ok(restaurants)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn create_restaurant(&self, restaurant: &Restaurant) -> Result<()> {
        let id = restaurant.id.to_string();
        let name = restaurant.name.clone();
        let conflict_id = restaurant.name.clone();

        self.conn
            .call(move |conn| {
                conn.execute(schema::INSERT_RESTAURANT, rusqlite::params![id, name])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Restaurant", conflict_id))
    }
}

// ============================================================================
// MenuRepository implementation
// ============================================================================

#[async_trait]
impl MenuRepository for SqliteRepository {
    async fn get_menu(&self, id: Uuid) -> Result<Option<Menu>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_MENU_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_menu) {
                    Ok(menu) => Ok(Some(menu)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Menu", id.to_string()))
    }

    async fn publish_menu(&self, menu: &Menu) -> Result<()> {
        let id = menu.id.to_string();
        let restaurant_id = menu.restaurant_id.to_string();
        let day = format_date(&menu.day);
        let name = menu.name.clone();
        let details = menu.details.clone();
        let vote_count = menu.vote_count;
        let conflict_id = format!("{}:{}", menu.restaurant_id, menu.day);

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_MENU,
                    rusqlite::params![id, restaurant_id, day, name, details, vote_count],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Menu", conflict_id))
    }

    async fn list_menus_for_day(&self, day: NaiveDate) -> Result<Vec<Menu>> {
        self.list_menus_for_days(&[day]).await
    }

    async fn list_menus_for_days(&self, days: &[NaiveDate]) -> Result<Vec<Menu>> {
        let day_strs: Vec<String> = days.iter().map(format_date).collect();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_MENUS_BY_DAY).map_err(wrap_err)?;

                let mut menus = Vec::new();
                for day in &day_strs {
                    let rows = stmt.query_map([day], row_to_menu).map_err(wrap_err)?;
                    for row_result in rows {
                        menus.push(row_result.map_err(wrap_err)?);
                    }
                }
                Ok(menus)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn increment_vote_count(&self, menu_id: Uuid) -> Result<()> {
        let id_str = menu_id.to_string();

        let rows = self
            .conn
            .call(move |conn| {
                conn.execute(schema::INCREMENT_VOTE_COUNT, [&id_str])
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Menu", menu_id.to_string()))?;

        if rows == 0 {
            return Err(RepositoryError::NotFound {
                entity_type: "Menu",
                id: menu_id.to_string(),
            });
        }
        Ok(())
    }

    async fn decrement_vote_count(&self, menu_id: Uuid) -> Result<()> {
        let id_str = menu_id.to_string();

        let status = self
            .conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DECREMENT_VOTE_COUNT, [&id_str])
                    .map_err(wrap_err)?;
                if rows > 0 {
                    return Ok(DecrementStatus::Decremented);
                }
                // Zero rows: either the menu is gone or its count is zero
                match SqliteRepository::menu_day(conn, &id_str)? {
                    Some(_) => Ok(DecrementStatus::WouldGoNegative),
                    None => Ok(DecrementStatus::Missing),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Menu", menu_id.to_string()))?;

        match status {
            DecrementStatus::Decremented => Ok(()),
            DecrementStatus::Missing => Err(RepositoryError::NotFound {
                entity_type: "Menu",
                id: menu_id.to_string(),
            }),
            DecrementStatus::WouldGoNegative => Err(RepositoryError::InvariantViolation(format!(
                "vote_count for menu {menu_id} would go negative"
            ))),
        }
    }
}

// ============================================================================
// VoteRepository implementation
// ============================================================================

#[async_trait]
impl VoteRepository for SqliteRepository {
    async fn get_vote(&self, id: Uuid) -> Result<Option<Vote>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_VOTE_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_vote) {
                    Ok(vote) => Ok(Some(vote)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Vote", id.to_string()))
    }

    async fn cast_vote(&self, vote: &Vote) -> Result<()> {
        let vote_owned = vote.clone();
        let menu_id = vote.menu_id;
        let employee_id = vote.employee_id;
        let day = vote.day;

        let status = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;

                let Some(menu_day) =
                    SqliteRepository::menu_day(&tx, &vote_owned.menu_id.to_string())?
                else {
                    return Ok(CastStatus::MenuMissing);
                };
                if parse_date(&menu_day).map_err(wrap_err)? != vote_owned.day {
                    return Ok(CastStatus::WrongDay);
                }

                // The UNIQUE (employee_id, day) constraint closes the
                // check/insert race; a conflict aborts the transaction here.
                tx.execute(
                    schema::INSERT_VOTE,
                    rusqlite::params![
                        vote_owned.id.to_string(),
                        vote_owned.menu_id.to_string(),
                        vote_owned.employee_id.to_string(),
                        format_date(&vote_owned.day),
                    ],
                )
                .map_err(wrap_err)?;
                tx.execute(
                    schema::INCREMENT_VOTE_COUNT,
                    [&vote_owned.menu_id.to_string()],
                )
                .map_err(wrap_err)?;

                tx.commit().map_err(wrap_err)?;
                Ok(CastStatus::Cast)
            })
            .await
            .map_err(|e| map_cast_vote_error(e, employee_id, day))?;

        match status {
            CastStatus::Cast => Ok(()),
            CastStatus::MenuMissing => Err(RepositoryError::NotFound {
                entity_type: "Menu",
                id: menu_id.to_string(),
            }),
            CastStatus::WrongDay => Err(RepositoryError::StaleMenu { menu_id, day }),
        }
    }

    async fn move_vote(&self, vote_id: Uuid, new_menu_id: Uuid) -> Result<Vote> {
        let status = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;

                let vote = match tx.query_row(
                    schema::SELECT_VOTE_BY_ID,
                    [&vote_id.to_string()],
                    row_to_vote,
                ) {
                    Ok(vote) => vote,
                    Err(rusqlite::Error::QueryReturnedNoRows) => {
                        return Ok(MoveStatus::VoteMissing)
                    }
                    Err(e) => return Err(wrap_err(e)),
                };

                if vote.menu_id == new_menu_id {
                    // No-op move: no count churn, nothing to commit
                    return Ok(MoveStatus::Moved(vote));
                }

                let Some(menu_day) = SqliteRepository::menu_day(&tx, &new_menu_id.to_string())?
                else {
                    return Ok(MoveStatus::MenuMissing);
                };
                if parse_date(&menu_day).map_err(wrap_err)? != vote.day {
                    return Ok(MoveStatus::WrongDay(vote.day));
                }

                let rows = tx
                    .execute(schema::DECREMENT_VOTE_COUNT, [&vote.menu_id.to_string()])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    // Dropping the transaction rolls everything back
                    return Ok(MoveStatus::Underflow(vote.menu_id));
                }
                tx.execute(schema::INCREMENT_VOTE_COUNT, [&new_menu_id.to_string()])
                    .map_err(wrap_err)?;
                tx.execute(
                    schema::UPDATE_VOTE_MENU,
                    rusqlite::params![vote_id.to_string(), new_menu_id.to_string()],
                )
                .map_err(wrap_err)?;

                tx.commit().map_err(wrap_err)?;
                Ok(MoveStatus::Moved(Vote {
                    menu_id: new_menu_id,
                    ..vote
                }))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Vote", vote_id.to_string()))?;

        match status {
            MoveStatus::Moved(vote) => Ok(vote),
            MoveStatus::VoteMissing => Err(RepositoryError::NotFound {
                entity_type: "Vote",
                id: vote_id.to_string(),
            }),
            MoveStatus::MenuMissing => Err(RepositoryError::NotFound {
                entity_type: "Menu",
                id: new_menu_id.to_string(),
            }),
            MoveStatus::WrongDay(day) => Err(RepositoryError::StaleMenu {
                menu_id: new_menu_id,
                day,
            }),
            MoveStatus::Underflow(menu_id) => Err(RepositoryError::InvariantViolation(format!(
                "vote_count for menu {menu_id} would go negative"
            ))),
        }
    }

    async fn count_votes_for_menu(&self, menu_id: Uuid) -> Result<u64> {
        let id_str = menu_id.to_string();

        let count: i64 = self
            .conn
            .call(move |conn| {
                conn.query_row(schema::COUNT_VOTES_FOR_MENU, [&id_str], |row| row.get(0))
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Menu", menu_id.to_string()))?;

        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 15)
    }

    async fn repo_with_menu() -> (SqliteRepository, Menu) {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let restaurant = Restaurant::new("Soup Palace");
        repo.create_restaurant(&restaurant).await.unwrap();
        let menu = Menu::publish(restaurant.id, "Monday special", "Corn Soup", today());
        repo.publish_menu(&menu).await.unwrap();
        (repo, menu)
    }

    #[tokio::test]
    async fn test_restaurant_roundtrip() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let restaurant = Restaurant::new("Soup Palace");

        repo.create_restaurant(&restaurant).await.unwrap();

        let retrieved = repo.get_restaurant(restaurant.id).await.unwrap();
        assert_eq!(retrieved, Some(restaurant));
    }

    #[tokio::test]
    async fn test_duplicate_restaurant_name_rejected() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        repo.create_restaurant(&Restaurant::new("Soup Palace"))
            .await
            .unwrap();

        let result = repo.create_restaurant(&Restaurant::new("Soup Palace")).await;
        assert!(matches!(
            result,
            Err(RepositoryError::AlreadyExists { .. })
        ));
    }

    #[tokio::test]
    async fn test_menu_roundtrip() {
        let (repo, menu) = repo_with_menu().await;

        let retrieved = repo.get_menu(menu.id).await.unwrap();
        assert_eq!(retrieved, Some(menu));
    }

    #[tokio::test]
    async fn test_duplicate_menu_per_restaurant_day_rejected() {
        let (repo, menu) = repo_with_menu().await;

        let second = Menu::publish(menu.restaurant_id, "Another", "Bread", today());
        let result = repo.publish_menu(&second).await;
        assert!(matches!(
            result,
            Err(RepositoryError::AlreadyExists { .. })
        ));
    }

    #[tokio::test]
    async fn test_menu_for_unknown_restaurant_rejected() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let menu = Menu::publish(Uuid::new_v4(), "Menu", "Soup", today());

        let result = repo.publish_menu(&menu).await;
        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_list_menus_for_days() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let restaurant = Restaurant::new("Soup Palace");
        repo.create_restaurant(&restaurant).await.unwrap();

        for (name, day) in [
            ("Thu", date(2024, 6, 13)),
            ("Fri", date(2024, 6, 14)),
            ("Sat", today()),
            ("Mon", date(2024, 6, 10)),
        ] {
            repo.publish_menu(&Menu::publish(restaurant.id, name, "Food", day))
                .await
                .unwrap();
        }

        let menus = repo
            .list_menus_for_days(&[date(2024, 6, 13), date(2024, 6, 14), today()])
            .await
            .unwrap();
        assert_eq!(menus.len(), 3);
    }

    #[tokio::test]
    async fn test_cast_vote_persists_and_increments() {
        let (repo, menu) = repo_with_menu().await;
        let vote = Vote::cast(menu.id, Uuid::new_v4(), today());

        repo.cast_vote(&vote).await.unwrap();

        assert_eq!(repo.get_vote(vote.id).await.unwrap(), Some(vote));
        assert_eq!(repo.get_menu(menu.id).await.unwrap().unwrap().vote_count, 1);
        assert_eq!(repo.count_votes_for_menu(menu.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_vote_rolls_back() {
        let (repo, menu) = repo_with_menu().await;
        let employee = Uuid::new_v4();

        repo.cast_vote(&Vote::cast(menu.id, employee, today()))
            .await
            .unwrap();
        let result = repo.cast_vote(&Vote::cast(menu.id, employee, today())).await;

        assert!(matches!(
            result,
            Err(RepositoryError::DuplicateVote { .. })
        ));
        // The rejected cast left no trace
        assert_eq!(repo.get_menu(menu.id).await.unwrap().unwrap().vote_count, 1);
        assert_eq!(repo.count_votes_for_menu(menu.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_stale_menu_rejected() {
        let (repo, menu) = repo_with_menu().await;
        let vote = Vote::cast(menu.id, Uuid::new_v4(), date(2024, 6, 16));

        let result = repo.cast_vote(&vote).await;

        assert!(matches!(result, Err(RepositoryError::StaleMenu { .. })));
        assert_eq!(repo.get_menu(menu.id).await.unwrap().unwrap().vote_count, 0);
    }

    #[tokio::test]
    async fn test_move_vote_round_trip() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let soup = Restaurant::new("Soup Palace");
        let taco = Restaurant::new("Taco Cart");
        repo.create_restaurant(&soup).await.unwrap();
        repo.create_restaurant(&taco).await.unwrap();

        let first = Menu::publish(soup.id, "Soup", "Corn Soup", today());
        let second = Menu::publish(taco.id, "Tacos", "Three tacos", today());
        repo.publish_menu(&first).await.unwrap();
        repo.publish_menu(&second).await.unwrap();

        let vote = Vote::cast(first.id, Uuid::new_v4(), today());
        repo.cast_vote(&vote).await.unwrap();

        let moved = repo.move_vote(vote.id, second.id).await.unwrap();
        assert_eq!(moved.menu_id, second.id);
        assert_eq!(repo.get_menu(first.id).await.unwrap().unwrap().vote_count, 0);
        assert_eq!(
            repo.get_menu(second.id).await.unwrap().unwrap().vote_count,
            1
        );

        let back = repo.move_vote(vote.id, first.id).await.unwrap();
        assert_eq!(back.menu_id, first.id);
        assert_eq!(repo.get_menu(first.id).await.unwrap().unwrap().vote_count, 1);
        assert_eq!(
            repo.get_menu(second.id).await.unwrap().unwrap().vote_count,
            0
        );
    }

    #[tokio::test]
    async fn test_move_vote_noop_same_menu() {
        let (repo, menu) = repo_with_menu().await;
        let vote = Vote::cast(menu.id, Uuid::new_v4(), today());
        repo.cast_vote(&vote).await.unwrap();

        let moved = repo.move_vote(vote.id, menu.id).await.unwrap();

        assert_eq!(moved.menu_id, menu.id);
        assert_eq!(repo.get_menu(menu.id).await.unwrap().unwrap().vote_count, 1);
    }

    #[tokio::test]
    async fn test_move_vote_to_other_day_rejected() {
        let (repo, menu) = repo_with_menu().await;
        let vote = Vote::cast(menu.id, Uuid::new_v4(), today());
        repo.cast_vote(&vote).await.unwrap();

        let tomorrow = Menu::publish(menu.restaurant_id, "Tue", "Stew", date(2024, 6, 16));
        repo.publish_menu(&tomorrow).await.unwrap();

        let result = repo.move_vote(vote.id, tomorrow.id).await;

        assert!(matches!(result, Err(RepositoryError::StaleMenu { .. })));
        assert_eq!(repo.get_menu(menu.id).await.unwrap().unwrap().vote_count, 1);
        assert_eq!(
            repo.get_menu(tomorrow.id).await.unwrap().unwrap().vote_count,
            0
        );
    }

    #[tokio::test]
    async fn test_decrement_below_zero_fails() {
        let (repo, menu) = repo_with_menu().await;

        let result = repo.decrement_vote_count(menu.id).await;

        assert!(matches!(
            result,
            Err(RepositoryError::InvariantViolation(_))
        ));
        assert_eq!(repo.get_menu(menu.id).await.unwrap().unwrap().vote_count, 0);
    }

    #[tokio::test]
    async fn test_increment_missing_menu_not_found() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();

        let result = repo.increment_vote_count(Uuid::new_v4()).await;

        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }
}
