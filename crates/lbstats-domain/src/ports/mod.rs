//! Domain Port Interfaces
//!
//! Defines the boundary contracts between the domain and external layers.
//! High-level code (the resolver) depends on these traits; providers and
//! adapters implement them.

/// External service provider ports
pub mod providers;

pub use providers::{
    AnalyticalEngine, BackingSource, CacheEntryConfig, CacheProvider, EngineRow, ListenCountStore,
    QueueDepthProbe, QueueProbe, SourceValue, UserCountStore,
};
