use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A restaurant that can publish one menu per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: Uuid,
    pub name: String,
}

impl Restaurant {
    /// Creates a new restaurant with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    /// Sets a specific ID for this restaurant (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// A menu published by a restaurant for a single calendar day.
///
/// `vote_count` is a denormalized tally of the votes currently referencing
/// this menu. It is mutated only through the vote ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub id: Uuid,
    /// The restaurant this menu belongs to.
    pub restaurant_id: Uuid,
    /// The calendar day the menu is valid for.
    pub day: NaiveDate,
    pub name: String,
    /// Free-text dish list, newline-separated in practice.
    pub details: String,
    pub vote_count: u32,
}

impl Menu {
    /// Creates a new menu for a restaurant and day, with no votes.
    pub fn publish(
        restaurant_id: Uuid,
        name: impl Into<String>,
        details: impl Into<String>,
        day: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            restaurant_id,
            day,
            name: name.into(),
            details: details.into(),
            vote_count: 0,
        }
    }

    /// Sets a specific ID for this menu (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Sets the vote count (useful for testing the tally).
    pub fn with_votes(mut self, vote_count: u32) -> Self {
        self.vote_count = vote_count;
        self
    }
}

/// A single employee's vote for a menu on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: Uuid,
    /// The menu the vote currently points at.
    pub menu_id: Uuid,
    pub employee_id: Uuid,
    /// The day the vote was cast. At most one vote exists per
    /// (employee, day).
    pub day: NaiveDate,
}

impl Vote {
    /// Creates a new vote for a menu on the given day.
    pub fn cast(menu_id: Uuid, employee_id: Uuid, day: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            menu_id,
            employee_id,
            day,
        }
    }

    /// Sets a specific ID for this vote (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// A winning menu as exposed to result readers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningMenu {
    /// The winning restaurant's name.
    pub restaurant: String,
    /// The winning menu's name.
    pub name: String,
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_menu_builder() {
        let restaurant_id = Uuid::new_v4();
        let menu = Menu::publish(
            restaurant_id,
            "Monday special",
            "Corn Soup\nSalad with Chicken",
            date(2024, 6, 15),
        );

        assert_eq!(menu.restaurant_id, restaurant_id);
        assert_eq!(menu.name, "Monday special");
        assert_eq!(menu.details, "Corn Soup\nSalad with Chicken");
        assert_eq!(menu.day, date(2024, 6, 15));
        assert_eq!(menu.vote_count, 0);
    }

    #[test]
    fn test_menu_with_votes() {
        let menu =
            Menu::publish(Uuid::new_v4(), "Menu", "Soup", date(2024, 6, 15)).with_votes(7);
        assert_eq!(menu.vote_count, 7);
    }

    #[test]
    fn test_vote_builder() {
        let menu_id = Uuid::new_v4();
        let employee_id = Uuid::new_v4();
        let vote = Vote::cast(menu_id, employee_id, date(2024, 6, 15));

        assert_eq!(vote.menu_id, menu_id);
        assert_eq!(vote.employee_id, employee_id);
        assert_eq!(vote.day, date(2024, 6, 15));
    }

    #[test]
    fn test_restaurant_builder() {
        let restaurant = Restaurant::new("Soup Palace").with_id(Uuid::nil());
        assert_eq!(restaurant.name, "Soup Palace");
        assert_eq!(restaurant.id, Uuid::nil());
    }
}
