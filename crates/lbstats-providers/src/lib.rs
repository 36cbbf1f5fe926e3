//! # lbstats - Provider Implementations
//!
//! This crate contains the concrete cache backends and backing store
//! clients. Each one implements a port defined in `lbstats-domain`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Cache | `CacheProvider` | Moka, Redis, Null |
//! | User store | `UserCountStore` | PostgreSQL |
//! | Analytical engine | `AnalyticalEngine` | BigQuery |
//! | Queue depth | `QueueDepthProbe` | RabbitMQ, Redis list |
//! | Listen store | `ListenCountStore` | InfluxDB |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! lbstats-providers = { version = "0.1", default-features = false, features = ["cache-moka"] }
//! ```
//!
//! Cache backends register themselves in the application layer's
//! `CACHE_PROVIDERS` slice; linking this crate is enough to make them
//! resolvable by name.

pub use lbstats_domain::error::{Error, Result};
pub use lbstats_domain::ports::providers::{
    AnalyticalEngine, CacheProvider, ListenCountStore, QueueDepthProbe, UserCountStore,
};

/// Provider-specific constants
pub mod constants;

/// Shared utilities for provider implementations
pub mod utils;

/// Cache provider implementations
pub mod cache;

/// HTTP client configuration for API-based clients
pub mod http;

/// Backing store clients
pub mod sources;
