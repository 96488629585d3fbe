use super::error::{MenuError, RestaurantError};
use super::types::{Menu, Restaurant};

/// Validates a restaurant before creation.
pub fn validate_restaurant(restaurant: &Restaurant) -> Result<(), RestaurantError> {
    if restaurant.name.trim().is_empty() {
        return Err(RestaurantError::EmptyName);
    }
    if restaurant.name.len() > 100 {
        return Err(RestaurantError::NameTooLong);
    }
    Ok(())
}

/// Validates a menu before publishing.
pub fn validate_menu(menu: &Menu) -> Result<(), MenuError> {
    if menu.name.trim().is_empty() {
        return Err(MenuError::EmptyName);
    }
    if menu.name.len() > 100 {
        return Err(MenuError::NameTooLong);
    }
    if menu.details.trim().is_empty() {
        return Err(MenuError::EmptyDetails);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_valid_restaurant() {
        let restaurant = Restaurant::new("Soup Palace");
        assert!(validate_restaurant(&restaurant).is_ok());
    }

    #[test]
    fn test_empty_restaurant_name() {
        let restaurant = Restaurant::new("   ");
        assert_eq!(
            validate_restaurant(&restaurant),
            Err(RestaurantError::EmptyName)
        );
    }

    #[test]
    fn test_restaurant_name_too_long() {
        let restaurant = Restaurant::new("x".repeat(101));
        assert_eq!(
            validate_restaurant(&restaurant),
            Err(RestaurantError::NameTooLong)
        );
    }

    #[test]
    fn test_valid_menu() {
        let menu = Menu::publish(Uuid::new_v4(), "Lunch", "Corn Soup\nSalad", date());
        assert!(validate_menu(&menu).is_ok());
    }

    #[test]
    fn test_empty_menu_name() {
        let menu = Menu::publish(Uuid::new_v4(), "", "Soup", date());
        assert_eq!(validate_menu(&menu), Err(MenuError::EmptyName));
    }

    #[test]
    fn test_empty_menu_details() {
        let menu = Menu::publish(Uuid::new_v4(), "Lunch", "\n", date());
        assert_eq!(validate_menu(&menu), Err(MenuError::EmptyDetails));
    }
}
