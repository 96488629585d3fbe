//! Cache backend implementations.
//!
//! This module provides concrete implementations of the cache trait
//! defined in `lunchvote_core::cache`. The implementation is selected at
//! compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `memory` (default): in-memory cache using tokio synchronization
//!   primitives with LRU eviction
//! - `redis`: Redis cache using the redis crate; required for
//!   multi-instance deployments, where every instance must see the same
//!   cached result and the same invalidations
//!
//! These features are mutually exclusive - only one cache backend can be
//! enabled at a time.

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

#[cfg(feature = "memory")]
pub use memory::MemoryCache;

#[cfg(feature = "redis")]
pub use redis_impl::RedisCache;
