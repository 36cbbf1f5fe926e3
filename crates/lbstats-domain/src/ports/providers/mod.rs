//! External Provider Ports
//!
//! Ports for the cache store and the backing sources aggregates are computed
//! from.
//!
//! ## Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | CacheProvider | Key/value store with per-key TTL |
//! | BackingSource | Uniform aggregate fetch dispatched by kind |
//! | UserCountStore | Relational user count |
//! | AnalyticalEngine | Parameterized aggregate query execution |
//! | QueueDepthProbe | Broker or list depth probing |
//! | ListenCountStore | Total listen count |

/// Cache provider port
pub mod cache;
/// Backing source ports
pub mod sources;

pub use cache::{CacheEntryConfig, CacheProvider};
pub use sources::{
    AnalyticalEngine, BackingSource, EngineRow, ListenCountStore, QueueDepthProbe, QueueProbe,
    SourceValue, UserCountStore,
};
