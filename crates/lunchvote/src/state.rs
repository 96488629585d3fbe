//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. It uses repository trait objects for storage
//! abstraction and supports different backend combinations via feature
//! flags.

use std::sync::Arc;

use lunchvote_core::cache::Cache;
use lunchvote_core::storage::{MenuRepository, RestaurantRepository, VoteRepository};

use crate::config::Config;
use crate::service::{ResultCache, VoteService};

// ============================================================================
// Compile-time feature validation
// ============================================================================

// Storage features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!("Cannot enable both 'sqlite' and 'inmemory' storage features");

#[cfg(not(any(feature = "inmemory", feature = "sqlite")))]
compile_error!("Must enable exactly one storage feature: 'inmemory' or 'sqlite'");

// Cache features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!("Cannot enable both 'memory' and 'redis' cache features");

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!("Must enable exactly one cache feature: 'memory' or 'redis'");

/// Shared application state.
///
/// This is cloned for each request handler and contains shared resources
/// including repository trait objects for database access.
#[derive(Clone)]
pub struct AppState {
    /// Restaurant repository.
    pub restaurant_repo: Arc<dyn RestaurantRepository>,
    /// Menu ledger repository.
    pub menu_repo: Arc<dyn MenuRepository>,
    /// Vote write side: ledger writes plus post-commit cache invalidation.
    pub votes: Arc<VoteService>,
    /// Cached result reads.
    pub results: Arc<ResultCache>,
}

impl AppState {
    /// Creates a new AppState with the given repositories, cache backend
    /// and configuration.
    fn build(
        restaurant_repo: Arc<dyn RestaurantRepository>,
        menu_repo: Arc<dyn MenuRepository>,
        vote_repo: Arc<dyn VoteRepository>,
        cache: Arc<dyn Cache>,
        config: &Config,
    ) -> Self {
        let results = Arc::new(ResultCache::new(
            menu_repo.clone(),
            restaurant_repo.clone(),
            cache,
            config.cache_ttl(),
        ));
        let votes = Arc::new(VoteService::new(vote_repo, results.clone()));

        Self {
            restaurant_repo,
            menu_repo,
            votes,
            results,
        }
    }

    /// Creates the application state for the compiled-in storage and cache
    /// backends.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        #[cfg(feature = "inmemory")]
        let repo = Arc::new(crate::storage::InMemoryRepository::new());

        #[cfg(feature = "sqlite")]
        let repo = Arc::new(crate::storage::SqliteRepository::new(&config.sqlite_path).await?);

        #[cfg(feature = "memory")]
        let cache: Arc<dyn Cache> =
            Arc::new(crate::cache::MemoryCache::new(config.cache_max_entries));

        #[cfg(feature = "redis")]
        let cache: Arc<dyn Cache> = Arc::new(crate::cache::RedisCache::new(&config.redis_url).await?);

        Ok(Self::build(
            repo.clone(),
            repo.clone(),
            repo,
            cache,
            config,
        ))
    }
}

#[cfg(all(test, feature = "inmemory", feature = "memory"))]
impl AppState {
    /// In-memory state for router tests.
    pub(crate) fn for_tests() -> Self {
        let repo = Arc::new(crate::storage::InMemoryRepository::new());
        let cache: Arc<dyn Cache> = Arc::new(crate::cache::MemoryCache::new(16));
        let config = Config {
            cache_ttl_seconds: 0,
            cache_max_entries: 16,
            sqlite_path: String::new(),
            redis_url: String::new(),
        };
        Self::build(repo.clone(), repo.clone(), repo, cache, &config)
    }
}
