//! Aggregate Resolver Use Case
//!
//! Cache-aside resolution of aggregate requests:
//!
//! ```text
//! validate ─▶ check cache ─┬─ hit ──────────────────────────▶ return
//!                          └─ miss ─▶ fetch ─┬─ ok ─▶ write-through ─▶ return
//!                                            └─ err ─▶ propagate / sentinel
//! ```
//!
//! An unreachable cache is treated as a miss and the write-through is skipped;
//! the fetched value is still returned. Queue kinds never fail: an unknown
//! depth is reported as [`UNKNOWN_QUEUE_DEPTH`] and is not cached.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use lbstats_domain::constants::{
    DEFAULT_FETCH_TIMEOUT_SECS, STATS_CACHE_TTL_SECS, STATS_NAMESPACE, UNKNOWN_QUEUE_DEPTH,
};
use lbstats_domain::error::{Error, Result};
use lbstats_domain::value_objects::{
    AggregateKind, AggregateRequest, AggregateResult, AggregateValue, ScalarAggregate,
};
use tracing::{debug, error, warn};

use super::stats_cache::StatsCache;
use crate::ports::providers::{BackingSource, CacheProvider, SourceValue};

/// Process-wide resolver settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Key prefix for cached statistics
    pub namespace: String,
    /// Lifetime of a cached statistic
    pub ttl: Duration,
    /// Upper bound on a single backing source call
    pub fetch_timeout: Duration,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            namespace: STATS_NAMESPACE.to_string(),
            ttl: Duration::from_secs(STATS_CACHE_TTL_SECS),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

/// Outcome of the cache check
enum Lookup {
    Hit(AggregateValue),
    Miss,
    /// Store unreachable; skip the write-through as well
    Bypass,
}

/// Resolves aggregate requests through the cache and the registered sources
#[derive(Debug)]
pub struct AggregateResolver {
    cache: StatsCache,
    sources: HashMap<AggregateKind, Arc<dyn BackingSource>>,
    ttl: Duration,
    fetch_timeout: Duration,
}

impl AggregateResolver {
    /// Create a resolver with no sources registered
    pub fn new(cache: Arc<dyn CacheProvider>, settings: ResolverSettings) -> Self {
        Self {
            cache: StatsCache::new(cache, settings.namespace),
            sources: HashMap::new(),
            ttl: settings.ttl,
            fetch_timeout: settings.fetch_timeout,
        }
    }

    /// Register `source` for every kind it serves, replacing earlier registrations
    pub fn register(&mut self, source: Arc<dyn BackingSource>) {
        for kind in source.kinds() {
            if self.sources.insert(*kind, Arc::clone(&source)).is_some() {
                warn!(kind = %kind, "Replacing backing source");
            }
        }
    }

    /// Builder-style [`register`](Self::register)
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn BackingSource>) -> Self {
        self.register(source);
        self
    }

    /// True if a source is registered for `kind`
    pub fn supports(&self, kind: AggregateKind) -> bool {
        self.sources.contains_key(&kind)
    }

    /// The cache this resolver reads and writes
    pub fn cache(&self) -> &StatsCache {
        &self.cache
    }

    /// Resolve `request` to its value
    pub async fn resolve(&self, request: &AggregateRequest) -> Result<AggregateValue> {
        request.validate()?;
        let kind = request.kind();
        let key = self.cache.key_for(request);

        let cache_available = match self.lookup(kind, &key).await {
            Lookup::Hit(value) => return Ok(value),
            Lookup::Miss => true,
            Lookup::Bypass => false,
        };

        let Some(value) = self.fetch(request).await? else {
            debug!(key = %key, "Queue depth unknown, not caching");
            return Ok(AggregateValue::Count(UNKNOWN_QUEUE_DEPTH));
        };

        if cache_available {
            self.write_through(&key, &value).await;
        }
        Ok(value)
    }

    /// Resolve a scalar request together with its cache key
    pub async fn scalar(&self, request: &AggregateRequest) -> Result<ScalarAggregate> {
        let key = self.cache.key_for(request);
        match self.resolve(request).await? {
            AggregateValue::Count(value) => Ok(ScalarAggregate { key, value }),
            AggregateValue::Rows(_) => Err(Error::validation(format!(
                "{} is not a scalar aggregate",
                request.kind()
            ))),
        }
    }

    /// Resolve a top-N request
    pub async fn top_entities(&self, request: &AggregateRequest) -> Result<AggregateResult> {
        match self.resolve(request).await? {
            AggregateValue::Rows(rows) => Ok(rows),
            AggregateValue::Count(_) => Err(Error::validation(format!(
                "{} is not a top-N aggregate",
                request.kind()
            ))),
        }
    }

    async fn lookup(&self, kind: AggregateKind, key: &str) -> Lookup {
        match self.cache.exists(key).await {
            Ok(false) => {
                debug!(key = %key, "Cache miss");
                return Lookup::Miss;
            }
            Ok(true) => {}
            Err(e) => return Self::cache_error(key, &e),
        }

        // The entry can expire between exists and get.
        let raw = match self.cache.get(key).await {
            Ok(raw) => raw,
            Err(e) if e.is_cache_miss() => {
                debug!(key = %key, "Cache entry expired before read");
                return Lookup::Miss;
            }
            Err(e) => return Self::cache_error(key, &e),
        };

        match AggregateValue::decode(kind, &raw) {
            Ok(value) => {
                debug!(key = %key, "Cache hit");
                Lookup::Hit(value)
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding undecodable cache entry");
                Lookup::Miss
            }
        }
    }

    fn cache_error(key: &str, err: &Error) -> Lookup {
        warn!(key = %key, error = %err, "Cache unavailable, fetching directly");
        Lookup::Bypass
    }

    /// Fetch from the registered source; `None` means an unknown queue depth
    async fn fetch(&self, request: &AggregateRequest) -> Result<Option<AggregateValue>> {
        let kind = request.kind();
        let source = self
            .sources
            .get(&kind)
            .ok_or_else(|| Error::internal(format!("No backing source registered for {kind}")))?;

        let outcome = match tokio::time::timeout(self.fetch_timeout, source.fetch(request)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(Error::backing_store(
                source.source_kind(),
                format!("{kind} fetch timed out after {:?}", self.fetch_timeout),
            )),
        };

        match outcome {
            Ok(SourceValue::Count(count)) if !kind.is_top_n() => {
                Ok(Some(AggregateValue::Count(count)))
            }
            Ok(SourceValue::Rows(rows)) if kind.is_top_n() => Ok(Some(AggregateValue::Rows(rows))),
            Ok(SourceValue::Unavailable) if kind.uses_queue_sentinel() => Ok(None),
            Ok(other) => Err(Error::internal(format!(
                "Source for {kind} returned an unexpected value: {other:?}"
            ))),
            Err(e) if kind.uses_queue_sentinel() => {
                warn!(kind = %kind, error = %e, "Queue probe failed, reporting unknown depth");
                Ok(None)
            }
            Err(e) => {
                error!(kind = %kind, error = %e, "Backing source failed");
                Err(e)
            }
        }
    }

    async fn write_through(&self, key: &str, value: &AggregateValue) {
        let encoded = match value.encode() {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to encode value for cache");
                return;
            }
        };
        if let Err(e) = self.cache.set_with_ttl(key, &encoded, self.ttl).await {
            warn!(key = %key, error = %e, "Failed to populate cache");
        }
    }
}
