//! In-memory repository implementation.
//!
//! All three entity maps live behind a single `RwLock`, so the multi-row
//! ledger operations (`cast_vote`, `move_vote`) run inside one write guard
//! and cannot interleave with other mutations. Data is not persisted and
//! will be lost when the repository is dropped.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use lunchvote_core::lunch::{Menu, Restaurant, Vote};
use lunchvote_core::storage::{
    MenuRepository, RepositoryError, RestaurantRepository, Result, VoteRepository,
};

#[derive(Debug, Default)]
struct LedgerState {
    restaurants: HashMap<Uuid, Restaurant>,
    menus: HashMap<Uuid, Menu>,
    votes: HashMap<Uuid, Vote>,
}

impl LedgerState {
    fn increment(&mut self, menu_id: Uuid) -> Result<()> {
        let menu = self
            .menus
            .get_mut(&menu_id)
            .ok_or(RepositoryError::NotFound {
                entity_type: "Menu",
                id: menu_id.to_string(),
            })?;
        menu.vote_count += 1;
        Ok(())
    }

    fn decrement(&mut self, menu_id: Uuid) -> Result<()> {
        let menu = self
            .menus
            .get_mut(&menu_id)
            .ok_or(RepositoryError::NotFound {
                entity_type: "Menu",
                id: menu_id.to_string(),
            })?;
        if menu.vote_count == 0 {
            return Err(RepositoryError::InvariantViolation(format!(
                "vote_count for menu {menu_id} would go negative"
            )));
        }
        menu.vote_count -= 1;
        Ok(())
    }
}

/// In-memory storage backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<RwLock<LedgerState>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RestaurantRepository for InMemoryRepository {
    async fn get_restaurant(&self, id: Uuid) -> Result<Option<Restaurant>> {
        let state = self.state.read().await;
        Ok(state.restaurants.get(&id).cloned())
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>> {
        let state = self.state.read().await;
        Ok(state.restaurants.values().cloned().collect())
    }

    async fn create_restaurant(&self, restaurant: &Restaurant) -> Result<()> {
        let mut state = self.state.write().await;
        if state.restaurants.contains_key(&restaurant.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Restaurant",
                id: restaurant.id.to_string(),
            });
        }
        if state
            .restaurants
            .values()
            .any(|r| r.name == restaurant.name)
        {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Restaurant",
                id: restaurant.name.clone(),
            });
        }
        state.restaurants.insert(restaurant.id, restaurant.clone());
        Ok(())
    }
}

#[async_trait]
impl MenuRepository for InMemoryRepository {
    async fn get_menu(&self, id: Uuid) -> Result<Option<Menu>> {
        let state = self.state.read().await;
        Ok(state.menus.get(&id).cloned())
    }

    async fn publish_menu(&self, menu: &Menu) -> Result<()> {
        let mut state = self.state.write().await;
        if !state.restaurants.contains_key(&menu.restaurant_id) {
            return Err(RepositoryError::InvalidData(format!(
                "menu references unknown restaurant {}",
                menu.restaurant_id
            )));
        }
        if state.menus.contains_key(&menu.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Menu",
                id: menu.id.to_string(),
            });
        }
        if state
            .menus
            .values()
            .any(|m| m.restaurant_id == menu.restaurant_id && m.day == menu.day)
        {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Menu",
                id: format!("{}:{}", menu.restaurant_id, menu.day),
            });
        }
        state.menus.insert(menu.id, menu.clone());
        Ok(())
    }

    async fn list_menus_for_day(&self, day: NaiveDate) -> Result<Vec<Menu>> {
        let state = self.state.read().await;
        Ok(state
            .menus
            .values()
            .filter(|m| m.day == day)
            .cloned()
            .collect())
    }

    async fn list_menus_for_days(&self, days: &[NaiveDate]) -> Result<Vec<Menu>> {
        let state = self.state.read().await;
        Ok(state
            .menus
            .values()
            .filter(|m| days.contains(&m.day))
            .cloned()
            .collect())
    }

    async fn increment_vote_count(&self, menu_id: Uuid) -> Result<()> {
        let mut state = self.state.write().await;
        state.increment(menu_id)
    }

    async fn decrement_vote_count(&self, menu_id: Uuid) -> Result<()> {
        let mut state = self.state.write().await;
        state.decrement(menu_id)
    }
}

#[async_trait]
impl VoteRepository for InMemoryRepository {
    async fn get_vote(&self, id: Uuid) -> Result<Option<Vote>> {
        let state = self.state.read().await;
        Ok(state.votes.get(&id).cloned())
    }

    async fn cast_vote(&self, vote: &Vote) -> Result<()> {
        // One write guard over the whole ledger: conflict check, insert
        // and count update cannot interleave with another cast.
        let mut state = self.state.write().await;

        let menu = state
            .menus
            .get(&vote.menu_id)
            .ok_or(RepositoryError::NotFound {
                entity_type: "Menu",
                id: vote.menu_id.to_string(),
            })?;
        if menu.day != vote.day {
            return Err(RepositoryError::StaleMenu {
                menu_id: vote.menu_id,
                day: vote.day,
            });
        }
        if state
            .votes
            .values()
            .any(|v| v.employee_id == vote.employee_id && v.day == vote.day)
        {
            return Err(RepositoryError::DuplicateVote {
                employee_id: vote.employee_id,
                day: vote.day,
            });
        }
        if state.votes.contains_key(&vote.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Vote",
                id: vote.id.to_string(),
            });
        }

        state.votes.insert(vote.id, vote.clone());
        state.increment(vote.menu_id)
    }

    async fn move_vote(&self, vote_id: Uuid, new_menu_id: Uuid) -> Result<Vote> {
        let mut state = self.state.write().await;

        let vote = state
            .votes
            .get(&vote_id)
            .cloned()
            .ok_or(RepositoryError::NotFound {
                entity_type: "Vote",
                id: vote_id.to_string(),
            })?;

        if vote.menu_id == new_menu_id {
            return Ok(vote);
        }

        let new_menu = state
            .menus
            .get(&new_menu_id)
            .ok_or(RepositoryError::NotFound {
                entity_type: "Menu",
                id: new_menu_id.to_string(),
            })?;
        if new_menu.day != vote.day {
            return Err(RepositoryError::StaleMenu {
                menu_id: new_menu_id,
                day: vote.day,
            });
        }

        // A vote always references an existing menu with a positive count;
        // anything else is a bookkeeping violation, surfaced not clamped.
        state
            .decrement(vote.menu_id)
            .map_err(|err| match err {
                RepositoryError::NotFound { .. } => RepositoryError::InvariantViolation(format!(
                    "vote {vote_id} references missing menu {}",
                    vote.menu_id
                )),
                other => other,
            })?;
        state.increment(new_menu_id)?;

        let stored = state
            .votes
            .get_mut(&vote_id)
            .ok_or(RepositoryError::NotFound {
                entity_type: "Vote",
                id: vote_id.to_string(),
            })?;
        stored.menu_id = new_menu_id;
        Ok(stored.clone())
    }

    async fn count_votes_for_menu(&self, menu_id: Uuid) -> Result<u64> {
        let state = self.state.read().await;
        Ok(state
            .votes
            .values()
            .filter(|v| v.menu_id == menu_id)
            .count() as u64)
    }
}
