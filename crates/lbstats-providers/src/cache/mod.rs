//! Cache Provider Implementations
//!
//! Provides caching backends for computed statistics.
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`NullCacheProvider`] | Disabled | Always misses |
//! | [`MokaCacheProvider`] | Local | In-memory cache with per-entry TTL |
//! | [`RedisCacheProvider`] | Distributed | Redis-backed, shared between instances |
//!
//! ## Provider Selection Guide
//!
//! - **Caching off**: `null`
//! - **Single Instance**: `moka`
//! - **Multi Instance**: `redis`

#[cfg(feature = "cache-moka")]
pub mod moka;
pub mod null;
#[cfg(feature = "cache-redis")]
pub mod redis;

#[cfg(feature = "cache-moka")]
pub use moka::MokaCacheProvider;
pub use null::NullCacheProvider;
#[cfg(feature = "cache-redis")]
pub use redis::RedisCacheProvider;

pub use lbstats_application::ports::providers::CacheEntryConfig;
