//! Stats cache
//!
//! Thin wrapper around a [`CacheProvider`] giving the resolver the
//! `exists` / `get` / `set_with_ttl` contract. A `get` on an absent or
//! expired key fails with [`Error::CacheMiss`].

use std::sync::Arc;
use std::time::Duration;

use lbstats_domain::error::{Error, Result};
use lbstats_domain::value_objects::AggregateRequest;

use crate::ports::providers::{CacheEntryConfig, CacheProvider};

/// Namespaced view of a cache provider
#[derive(Debug, Clone)]
pub struct StatsCache {
    provider: Arc<dyn CacheProvider>,
    namespace: String,
}

impl StatsCache {
    pub fn new(provider: Arc<dyn CacheProvider>, namespace: impl Into<String>) -> Self {
        Self {
            provider,
            namespace: namespace.into(),
        }
    }

    /// Key prefix of every entry written through this cache
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Cache key for a request
    pub fn key_for(&self, request: &AggregateRequest) -> String {
        request.cache_key(&self.namespace)
    }

    pub async fn exists(&self, key: &str) -> Result<bool> {
        self.provider.exists(key).await
    }

    pub async fn get(&self, key: &str) -> Result<String> {
        self.provider
            .get_json(key)
            .await?
            .ok_or_else(|| Error::cache_miss(key))
    }

    /// Store `value`, overwriting any entry; it expires `ttl` from now
    pub async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.provider
            .set_json(key, value, CacheEntryConfig::default().with_ttl(ttl))
            .await
    }
}
