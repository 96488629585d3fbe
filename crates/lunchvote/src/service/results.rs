//! Cached vote result reads.
//!
//! Implements the cache-aside pattern over the single result key:
//! - **Reads**: check the cache first, on miss recompute from the menu
//!   ledger and populate the cache
//! - **Invalidation**: best-effort delete, fired by the vote service after
//!   a ledger write commits

use std::sync::Arc;
use std::time::Duration;

use lunchvote_core::cache::{deserialize_winners, result_key, serialize_winners, Cache};
use lunchvote_core::lunch::{daily_winners, WinningMenu};
use lunchvote_core::storage::{
    DayWindow, MenuRepository, RepositoryError, RestaurantRepository, Result,
};

/// Cached access to the daily winner computation.
///
/// The cache holds derived data only; a read racing an invalidation costs
/// at most one extra recomputation and can never corrupt ledger state.
pub struct ResultCache {
    menus: Arc<dyn MenuRepository>,
    restaurants: Arc<dyn RestaurantRepository>,
    cache: Arc<dyn Cache>,
    ttl: Option<Duration>,
}

impl ResultCache {
    /// Creates a new result cache over the given repositories and cache
    /// backend.
    pub fn new(
        menus: Arc<dyn MenuRepository>,
        restaurants: Arc<dyn RestaurantRepository>,
        cache: Arc<dyn Cache>,
        ttl: Option<Duration>,
    ) -> Self {
        Self {
            menus,
            restaurants,
            cache,
            ttl,
        }
    }

    /// Returns the winning menus for the window's final day.
    ///
    /// Serves the cached value when present; otherwise recomputes from the
    /// menu ledger and stores the result under the fixed key. Failure to
    /// populate the cache is logged and ignored - the computed result is
    /// still returned.
    pub async fn get_result(&self, window: DayWindow) -> Result<Vec<WinningMenu>> {
        let key = result_key();

        if let Ok(Some(bytes)) = self.cache.get(key).await {
            match deserialize_winners(&bytes) {
                Ok(winners) => {
                    tracing::trace!(count = winners.len(), "Cache hit for vote result");
                    return Ok(winners);
                }
                // Deserialization failed - treat as cache miss
                Err(err) => {
                    tracing::warn!(error = %err, "Cached vote result failed to deserialize");
                }
            }
        }

        tracing::trace!(day = %window.today(), "Cache miss for vote result");
        let menus = self.menus.list_menus_for_days(&window.days()).await?;
        let winners = daily_winners(&menus, &window);

        let mut result = Vec::with_capacity(winners.len());
        for menu in winners {
            let restaurant = self
                .restaurants
                .get_restaurant(menu.restaurant_id)
                .await?
                .ok_or_else(|| RepositoryError::NotFound {
                    entity_type: "Restaurant",
                    id: menu.restaurant_id.to_string(),
                })?;
            result.push(WinningMenu {
                restaurant: restaurant.name,
                name: menu.name.clone(),
                details: menu.details.clone(),
            });
        }

        if let Ok(bytes) = serialize_winners(&result) {
            if let Err(err) = self.cache.set(key, &bytes, self.ttl).await {
                tracing::warn!(error = %err, "Failed to cache vote result");
            }
        }

        Ok(result)
    }

    /// Drops the cached result.
    ///
    /// Best-effort: an unreachable cache store is logged and swallowed,
    /// because staleness is tolerable where failing the triggering ledger
    /// write is not.
    pub async fn invalidate(&self) {
        if let Err(err) = self.cache.delete(result_key()).await {
            tracing::warn!(error = %err, "Failed to invalidate vote result cache");
        }
    }
}
