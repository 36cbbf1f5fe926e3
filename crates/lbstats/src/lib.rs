//! # lbstats
//!
//! Cache-backed retrieval of ListenBrainz statistics: per-user top
//! recordings, artists and releases, user and listen counts, and queue
//! depths. Each statistic is read from a shared cache when present and
//! otherwise computed from its backing store and written back with a TTL.
//!
//! ## Example
//!
//! ```ignore
//! use lbstats::domain::{AggregateKind, AggregateRequest, TimeWindow};
//! use lbstats::infrastructure::{AppConfig, init_app};
//!
//! let context = init_app(AppConfig::default())?;
//! let request = AggregateRequest::top(AggregateKind::TopArtists, "rob", Some("7 DAY".parse()?));
//! let artists = context.resolver().top_entities(&request).await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Requests, results, errors and port traits
//! - `application` - Query builder, source adapters, resolver and status service
//! - `infrastructure` - Configuration, logging and the composition root
//! - `cli` - The `lbstats` command

/// Domain layer - core types
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use lbstats_domain::*;
}

/// Application layer - resolver, adapters and services
pub mod application {
    pub use lbstats_application::*;
}

/// Infrastructure layer - config, logging and bootstrap
pub mod infrastructure {
    pub use lbstats_infrastructure::*;
}

pub mod cli;

// Re-export commonly used domain types at the crate root
pub use domain::*;

pub use application::{AggregateResolver, CurrentStatus, StatusService};
pub use infrastructure::{AppConfig, AppContext, init_app};
