//! Cache and aggregate configuration types

use crate::constants::DEFAULT_CACHE_PROVIDER;
use lbstats_domain::constants::{
    DEFAULT_ENTITY_LIMIT, DEFAULT_FETCH_TIMEOUT_SECS, STATS_CACHE_TTL_SECS, STATS_NAMESPACE,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Registered cache backend name (`moka`, `redis`, `null`)
    pub provider: String,

    /// Redis URL (for the `redis` provider)
    pub redis_url: Option<String>,

    /// Namespace prefixed to every key
    pub namespace: String,

    /// Lifetime of a cached statistic in seconds
    pub ttl_secs: u64,

    /// Entry bound for the in-memory backend
    pub max_capacity: Option<u64>,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_CACHE_PROVIDER.to_string(),
            redis_url: None,
            namespace: STATS_NAMESPACE.to_string(),
            ttl_secs: STATS_CACHE_TTL_SECS,
            max_capacity: None,
        }
    }
}

/// Aggregate computation limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Maximum rows in a top-N result
    pub entity_limit: usize,

    /// Upper bound on a single backing source call in seconds
    pub fetch_timeout_secs: u64,
}

impl StatsConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            entity_limit: DEFAULT_ENTITY_LIMIT,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}
