use serde::Deserialize;

use lunchvote_core::lunch::Restaurant;

/// Request payload for creating a new restaurant.
#[derive(Debug, Deserialize)]
pub struct CreateRestaurant {
    pub name: String,
}

impl CreateRestaurant {
    /// Converts the payload into a domain restaurant.
    pub fn into_restaurant(self) -> Restaurant {
        Restaurant::new(self.name)
    }
}
