//! Application Port Interfaces
//!
//! ## Organization
//!
//! - **providers** - Cache and backing source ports, re-exported from the domain
//! - **infrastructure** - Host facilities (load average)
//! - **registry** - Auto-registration system for cache providers

/// Host facility ports
pub mod infrastructure;
/// Provider registry for dynamic provider discovery
pub mod registry;

/// External service provider ports
pub mod providers {
    pub use lbstats_domain::ports::providers::*;
}

pub use infrastructure::{LoadAverage, SystemLoadProvider};
pub use providers::{
    AnalyticalEngine, BackingSource, CacheEntryConfig, CacheProvider, EngineRow, ListenCountStore,
    QueueDepthProbe, QueueProbe, SourceValue, UserCountStore,
};
pub use registry::{
    CACHE_PROVIDERS, CacheProviderConfig, CacheProviderEntry, list_cache_providers,
    resolve_cache_provider,
};
