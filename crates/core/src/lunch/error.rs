use thiserror::Error;

/// Errors that can occur when validating restaurants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RestaurantError {
    #[error("Restaurant name cannot be empty")]
    EmptyName,
    #[error("Restaurant name too long (max 100 characters)")]
    NameTooLong,
}

/// Errors that can occur when validating menus.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MenuError {
    #[error("Menu name cannot be empty")]
    EmptyName,
    #[error("Menu name too long (max 100 characters)")]
    NameTooLong,
    #[error("Menu details cannot be empty")]
    EmptyDetails,
}
