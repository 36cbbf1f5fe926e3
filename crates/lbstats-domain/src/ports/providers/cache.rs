//! Cache Provider Port
//!
//! Port for cache backend providers. Supports in-memory (Moka), distributed
//! (Redis), and null providers.
//!
//! Connectivity failures must be reported as
//! [`Error::CacheUnavailable`](crate::error::Error::CacheUnavailable) so that
//! callers can degrade to a direct fetch instead of failing.

use crate::constants::STATS_CACHE_TTL_SECS;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache Entry Configuration
///
/// Configures how a cache entry should be stored.
///
/// # Example
///
/// ```
/// use lbstats_domain::ports::providers::cache::CacheEntryConfig;
///
/// let config = CacheEntryConfig::default().with_ttl_secs(60);
/// assert_eq!(config.ttl.as_secs(), 60);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntryConfig {
    /// Time to live for the cache entry
    pub ttl: Duration,
}

impl CacheEntryConfig {
    /// Create a new cache entry config with the stats TTL
    pub fn new() -> Self {
        Self {
            ttl: Duration::from_secs(STATS_CACHE_TTL_SECS),
        }
    }

    /// Set the TTL for the cache entry
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set TTL in seconds
    pub fn with_ttl_secs(mut self, secs: u64) -> Self {
        self.ttl = Duration::from_secs(secs);
        self
    }
}

impl Default for CacheEntryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache Provider Port
///
/// String key/value storage with per-key expiry. Entries are overwritten on
/// set and lazily absent once expired; there is no explicit invalidation.
///
/// # Implementations
///
/// - **Moka**: In-memory cache with per-entry TTL
/// - **Redis**: Distributed cache shared by all instances
/// - **Null**: Always misses, used when caching is disabled
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug {
    /// Get a value from the cache
    ///
    /// # Returns
    /// The cached string if present, None if not found or expired
    async fn get_json(&self, key: &str) -> Result<Option<String>>;

    /// Set a value, replacing any existing entry and resetting its expiry
    async fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()>;

    /// Check if a key exists in the cache
    ///
    /// # Returns
    /// True if the key exists and hasn't expired
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Get the name/identifier of this provider implementation
    ///
    /// # Returns
    /// A string identifier for the provider (e.g., "moka", "redis", "null")
    fn provider_name(&self) -> &str;
}
