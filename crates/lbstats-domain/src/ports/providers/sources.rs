//! Backing Source Ports
//!
//! Two levels of contract live here:
//!
//! - Raw capabilities implemented by clients in `lbstats-providers`
//!   ([`UserCountStore`], [`AnalyticalEngine`], [`QueueDepthProbe`],
//!   [`ListenCountStore`]).
//! - The uniform [`BackingSource`] contract the resolver dispatches on. The
//!   adapters implementing it live in `lbstats-application` and wrap the raw
//!   capabilities.

use crate::error::{Result, SourceKind};
use crate::value_objects::{AggregateKind, AggregateQuery, AggregateRequest, AggregateResult};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Raw value produced by a backing source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceValue {
    /// Scalar count
    Count(i64),
    /// Top-N rows, already ordered and capped
    Rows(AggregateResult),
    /// The source could not be probed; reported as unknown rather than an error
    Unavailable,
}

/// Uniform fetch contract over heterogeneous backing sources
#[async_trait]
pub trait BackingSource: Send + Sync + std::fmt::Debug {
    /// Aggregate kinds this source can compute
    fn kinds(&self) -> &'static [AggregateKind];

    /// Which backing system this source talks to
    fn source_kind(&self) -> SourceKind;

    /// Compute the value for `request`
    ///
    /// Must not retry internally; retry policy belongs to the caller.
    async fn fetch(&self, request: &AggregateRequest) -> Result<SourceValue>;
}

/// Count of registered users in the relational store
#[async_trait]
pub trait UserCountStore: Send + Sync {
    /// Run the count query
    async fn count_users(&self) -> Result<i64>;
}

/// A row returned by the analytical engine, keyed by column name
///
/// Engines return every cell as an optional string; typing happens in the
/// adapter against the query's column specs.
pub type EngineRow = BTreeMap<String, Option<String>>;

/// Opaque "run aggregate query" capability
#[async_trait]
pub trait AnalyticalEngine: Send + Sync {
    /// Execute `query` with its bound parameters
    async fn run_query(&self, query: &AggregateQuery) -> Result<Vec<EngineRow>>;
}

/// Outcome of a queue probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueProbe {
    /// Number of messages currently in the queue
    Depth(u64),
    /// The broker could not be reached or returned something unusable
    Unavailable,
}

/// Opaque "get queue depth" capability
#[async_trait]
pub trait QueueDepthProbe: Send + Sync {
    /// Probe the depth of `queue`; never fails, reports
    /// [`QueueProbe::Unavailable`] instead
    async fn probe(&self, queue: &str) -> QueueProbe;
}

/// Total listen count from the listen store
#[async_trait]
pub trait ListenCountStore: Send + Sync {
    /// Fetch the total number of listens
    async fn total_listen_count(&self) -> Result<i64>;
}
