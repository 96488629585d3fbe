use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::lunch::{Menu, Restaurant, Vote};

use super::Result;

/// Repository for restaurant records.
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Gets a restaurant by its ID.
    async fn get_restaurant(&self, id: Uuid) -> Result<Option<Restaurant>>;

    /// Lists all restaurants.
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>>;

    /// Creates a new restaurant. Restaurant names are unique.
    async fn create_restaurant(&self, restaurant: &Restaurant) -> Result<()>;
}

/// Repository for the menu ledger.
///
/// `vote_count` is written only through [`increment_vote_count`] and
/// [`decrement_vote_count`] (directly or inside the vote ledger's
/// transactions); no other path may touch it.
///
/// [`increment_vote_count`]: MenuRepository::increment_vote_count
/// [`decrement_vote_count`]: MenuRepository::decrement_vote_count
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Gets a menu by its ID.
    async fn get_menu(&self, id: Uuid) -> Result<Option<Menu>>;

    /// Publishes a new menu. At most one menu may exist per
    /// (restaurant, day).
    async fn publish_menu(&self, menu: &Menu) -> Result<()>;

    /// Lists all menus for a single day.
    async fn list_menus_for_day(&self, day: NaiveDate) -> Result<Vec<Menu>>;

    /// Lists all menus whose day is in the given set of days.
    async fn list_menus_for_days(&self, days: &[NaiveDate]) -> Result<Vec<Menu>>;

    /// Increases a menu's vote count by one, atomically with respect to
    /// concurrent count mutations on the same menu.
    async fn increment_vote_count(&self, menu_id: Uuid) -> Result<()>;

    /// Decreases a menu's vote count by one. A count that would go
    /// negative fails with `InvariantViolation`; it is never clamped.
    async fn decrement_vote_count(&self, menu_id: Uuid) -> Result<()>;
}

/// Repository for the vote ledger.
///
/// The two mutating operations are single atomic units against the store:
/// either every row touched by the operation is updated, or none is.
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Gets a vote by its ID.
    async fn get_vote(&self, id: Uuid) -> Result<Option<Vote>>;

    /// Casts a vote: verifies the target menu is from the vote's day,
    /// inserts the vote under the store-enforced (employee, day)
    /// uniqueness constraint, and increments the menu's vote count, all
    /// in one transaction.
    ///
    /// Fails with `StaleMenu` if the menu's day differs from the vote's,
    /// `DuplicateVote` if the employee already voted that day, and
    /// `NotFound` if the menu does not exist.
    async fn cast_vote(&self, vote: &Vote) -> Result<()>;

    /// Moves an existing vote to another menu from the same day:
    /// decrements the old menu's count, increments the new menu's count,
    /// and repoints the vote, all in one transaction. Moving a vote onto
    /// its current menu is a no-op.
    ///
    /// Returns the updated vote.
    async fn move_vote(&self, vote_id: Uuid, new_menu_id: Uuid) -> Result<Vote>;

    /// Counts the votes currently referencing a menu.
    async fn count_votes_for_menu(&self, menu_id: Uuid) -> Result<u64>;
}
