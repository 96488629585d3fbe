mod menu;
mod restaurant;
mod vote;

pub use menu::PublishMenu;
pub use restaurant::CreateRestaurant;
pub use vote::{CastVote, MoveVote};
