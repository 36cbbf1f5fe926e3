//! Use Cases
//!
//! Application services that orchestrate the cache and the backing sources.

pub mod aggregate_resolver;
pub mod stats_cache;
pub mod status_service;

pub use aggregate_resolver::{AggregateResolver, ResolverSettings};
pub use stats_cache::StatsCache;
pub use status_service::{CurrentStatus, StatusQueues, StatusService};
