//! Redis distributed cache provider
//!
//! Cache shared by every lbstats instance. Values are written with `SETEX`
//! so Redis enforces the TTL; lookups use `EXISTS` and `GET`.
//!
//! Any failure to reach the server or run a command is reported as
//! [`Error::CacheUnavailable`], which the resolver treats as a miss.
//!
//! ## Example
//!
//! ```ignore
//! use lbstats_providers::cache::RedisCacheProvider;
//!
//! let provider = RedisCacheProvider::new("redis://localhost:6379")?;
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use lbstats_application::ports::providers::{CacheEntryConfig, CacheProvider};
use lbstats_application::ports::registry::{CACHE_PROVIDERS, CacheProviderConfig, CacheProviderEntry};
use lbstats_domain::error::{Error, Result};
use redis::{AsyncCommands, Client, aio::MultiplexedConnection};

use crate::constants::REDIS_DEFAULT_PORT;

/// Redis cache provider
///
/// Uses multiplexed connections for efficient connection reuse.
#[derive(Clone)]
pub struct RedisCacheProvider {
    client: Client,
}

impl RedisCacheProvider {
    /// Create a new Redis cache provider with connection string
    ///
    /// Does not connect; the first command does.
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| {
            Error::configuration_with_source(format!("Invalid Redis URL '{connection_string}'"), e)
        })?;

        Ok(Self { client })
    }

    /// Create a new Redis cache provider with host and port
    pub fn with_host_port(host: &str, port: u16) -> Result<Self> {
        Self::new(&format!("redis://{host}:{port}"))
    }

    async fn get_connection(&self) -> Result<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| Error::cache_unavailable_with_source("Failed to get Redis connection", e))
    }
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.get_connection().await?;

        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| Error::cache_unavailable_with_source("Redis GET failed", e))
    }

    async fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()> {
        let mut conn = self.get_connection().await?;

        // SETEX rejects a zero expiry
        let ttl_seconds = config.ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_seconds)
            .await
            .map_err(|e| Error::cache_unavailable_with_source("Redis SETEX failed", e))
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;

        conn.exists::<_, bool>(key)
            .await
            .map_err(|e| Error::cache_unavailable_with_source("Redis EXISTS failed", e))
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheProvider")
            .field("server", &self.client.get_connection_info().addr)
            .finish()
    }
}

#[linkme::distributed_slice(CACHE_PROVIDERS)]
static REDIS_PROVIDER: CacheProviderEntry = CacheProviderEntry {
    name: "redis",
    description: "Redis distributed cache",
    factory: |config: &CacheProviderConfig| {
        let provider = match config.uri.as_deref() {
            Some(uri) => RedisCacheProvider::new(uri),
            None => RedisCacheProvider::with_host_port("localhost", REDIS_DEFAULT_PORT),
        }
        .map_err(|e| e.to_string())?;
        Ok(Arc::new(provider))
    },
};
