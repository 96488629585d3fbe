mod error;
mod operations;
mod tally;
mod types;

pub use error::{MenuError, RestaurantError};
pub use operations::{validate_menu, validate_restaurant};
pub use tally::daily_winners;
pub use types::{Menu, Restaurant, Vote, WinningMenu};
