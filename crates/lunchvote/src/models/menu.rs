use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use lunchvote_core::lunch::Menu;

/// Request payload for publishing a menu.
#[derive(Debug, Deserialize)]
pub struct PublishMenu {
    pub restaurant_id: Uuid,
    pub name: String,
    pub details: String,
    /// The day the menu is for; defaults to the current day when omitted.
    pub day: Option<NaiveDate>,
}

impl PublishMenu {
    /// Converts the payload into a domain menu, filling in the default day.
    pub fn into_menu(self, default_day: NaiveDate) -> Menu {
        let day = self.day.unwrap_or(default_day);
        Menu::publish(self.restaurant_id, self.name, self.details, day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_into_menu_defaults_day() {
        let payload = PublishMenu {
            restaurant_id: Uuid::new_v4(),
            name: "Monday special".to_string(),
            details: "Corn Soup".to_string(),
            day: None,
        };

        let menu = payload.into_menu(date(2024, 6, 15));

        assert_eq!(menu.day, date(2024, 6, 15));
        assert_eq!(menu.vote_count, 0);
    }

    #[test]
    fn test_into_menu_explicit_day_wins() {
        let payload = PublishMenu {
            restaurant_id: Uuid::new_v4(),
            name: "Friday special".to_string(),
            details: "Stew".to_string(),
            day: Some(date(2024, 6, 14)),
        };

        let menu = payload.into_menu(date(2024, 6, 15));

        assert_eq!(menu.day, date(2024, 6, 14));
    }
}
