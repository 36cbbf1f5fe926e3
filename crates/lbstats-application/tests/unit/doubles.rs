//! Hand-written test doubles for the cache and backing source ports

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lbstats_application::ports::providers::{
    AnalyticalEngine, BackingSource, CacheEntryConfig, CacheProvider, EngineRow,
    ListenCountStore, QueueDepthProbe, QueueProbe, SourceValue, UserCountStore,
};
use lbstats_domain::error::{Error, Result, SourceKind};
use lbstats_domain::value_objects::{AggregateKind, AggregateQuery, AggregateRequest};

/// In-memory cache driven by a manual clock
#[derive(Debug, Default)]
pub struct ManualClockCache {
    now: Mutex<Duration>,
    entries: Mutex<HashMap<String, (String, Duration)>>,
    writes: Mutex<Vec<(String, String, Duration)>>,
    lookups: AtomicUsize,
}

impl ManualClockCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }

    /// Insert an entry directly, bypassing the write log
    pub fn seed(&self, key: &str, value: &str, ttl: Duration) {
        let expiry = *self.now.lock().unwrap() + ttl;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), expiry));
    }

    /// Every `set_json` call as (key, value, ttl)
    pub fn writes(&self) -> Vec<(String, String, Duration)> {
        self.writes.lock().unwrap().clone()
    }

    /// Number of `exists` and `get_json` calls
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn live_value(&self, key: &str) -> Option<String> {
        let now = *self.now.lock().unwrap();
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .filter(|(_, expiry)| *expiry > now)
            .map(|(value, _)| value.clone())
    }
}

#[async_trait]
impl CacheProvider for ManualClockCache {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.live_value(key))
    }

    async fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()> {
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_string(), config.ttl));
        self.seed(key, value, config.ttl);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.live_value(key).is_some())
    }

    fn provider_name(&self) -> &str {
        "manual-clock"
    }
}

/// Cache whose store can never be reached
#[derive(Debug, Default)]
pub struct UnreachableCache {
    writes: AtomicUsize,
}

impl UnreachableCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn write_attempts(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheProvider for UnreachableCache {
    async fn get_json(&self, _key: &str) -> Result<Option<String>> {
        Err(Error::cache_unavailable("connection refused"))
    }

    async fn set_json(&self, _key: &str, _value: &str, _config: CacheEntryConfig) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(Error::cache_unavailable("connection refused"))
    }

    async fn exists(&self, _key: &str) -> Result<bool> {
        Err(Error::cache_unavailable("connection refused"))
    }

    fn provider_name(&self) -> &str {
        "unreachable"
    }
}

/// What a [`CountingSource`] does when fetched
#[derive(Debug, Clone)]
pub enum Behavior {
    Value(SourceValue),
    Fail,
    Hang,
}

/// Backing source that counts its fetches
#[derive(Debug)]
pub struct CountingSource {
    kinds: &'static [AggregateKind],
    source_kind: SourceKind,
    behavior: Mutex<Behavior>,
    calls: AtomicUsize,
}

impl CountingSource {
    pub fn new(
        kinds: &'static [AggregateKind],
        source_kind: SourceKind,
        behavior: Behavior,
    ) -> Arc<Self> {
        Arc::new(Self {
            kinds,
            source_kind,
            behavior: Mutex::new(behavior),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn user_count(count: i64) -> Arc<Self> {
        Self::new(
            &[AggregateKind::UserCount],
            SourceKind::Relational,
            Behavior::Value(SourceValue::Count(count)),
        )
    }

    pub fn set_behavior(&self, behavior: Behavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackingSource for CountingSource {
    fn kinds(&self) -> &'static [AggregateKind] {
        self.kinds
    }

    fn source_kind(&self) -> SourceKind {
        self.source_kind
    }

    async fn fetch(&self, _request: &AggregateRequest) -> Result<SourceValue> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let behavior = self.behavior.lock().unwrap().clone();
        match behavior {
            Behavior::Value(value) => Ok(value),
            Behavior::Fail => Err(Error::backing_store(self.source_kind, "induced failure")),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(SourceValue::Unavailable)
            }
        }
    }
}

/// User store returning a fixed count or failing
pub struct FixedUserStore(pub Option<i64>);

#[async_trait]
impl UserCountStore for FixedUserStore {
    async fn count_users(&self) -> Result<i64> {
        self.0
            .ok_or_else(|| Error::internal("pool exhausted"))
    }
}

/// Listen store returning a fixed count or failing
pub struct FixedListenStore(pub Option<i64>);

#[async_trait]
impl ListenCountStore for FixedListenStore {
    async fn total_listen_count(&self) -> Result<i64> {
        self.0.ok_or_else(|| {
            Error::backing_store(SourceKind::ListenStore, "influx returned 500")
        })
    }
}

/// Probe answering from a fixed table; unknown queues are unavailable
#[derive(Default)]
pub struct TableProbe {
    depths: HashMap<String, u64>,
    probed: Mutex<Vec<String>>,
}

impl TableProbe {
    pub fn with(mut self, queue: &str, depth: u64) -> Self {
        self.depths.insert(queue.to_string(), depth);
        self
    }

    pub fn probed(&self) -> Vec<String> {
        self.probed.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueueDepthProbe for TableProbe {
    async fn probe(&self, queue: &str) -> QueueProbe {
        self.probed.lock().unwrap().push(queue.to_string());
        self.depths
            .get(queue)
            .map_or(QueueProbe::Unavailable, |depth| QueueProbe::Depth(*depth))
    }
}

/// Analytical engine returning canned rows and recording the queries it ran
#[derive(Default)]
pub struct CannedEngine {
    rows: Vec<EngineRow>,
    fail: bool,
    queries: Mutex<Vec<AggregateQuery>>,
}

impl CannedEngine {
    pub fn returning(rows: Vec<EngineRow>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn queries(&self) -> Vec<AggregateQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalyticalEngine for CannedEngine {
    async fn run_query(&self, query: &AggregateQuery) -> Result<Vec<EngineRow>> {
        self.queries.lock().unwrap().push(query.clone());
        if self.fail {
            return Err(Error::backing_store(
                SourceKind::Analytical,
                "Engine rejected query (400)",
            ));
        }
        Ok(self.rows.clone())
    }
}

/// Engine row for an artist aggregate
pub fn artist_row(name: &str, msid: Option<&str>, count: i64) -> EngineRow {
    EngineRow::from([
        ("artist_name".to_string(), Some(name.to_string())),
        ("artist_msid".to_string(), msid.map(str::to_string)),
        ("artist_mbids".to_string(), Some(String::new())),
        ("listen_count".to_string(), Some(count.to_string())),
    ])
}
