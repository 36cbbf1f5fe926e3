//! Application Layer - lbstats
//!
//! Orchestrates cache-backed aggregate retrieval on top of the domain ports.
//!
//! ## Architecture
//!
//! The application layer:
//! - Builds analytical queries from fixed per-kind templates
//! - Adapts the raw backing capabilities to the uniform `BackingSource` contract
//! - Resolves requests through the cache with write-through on miss
//! - Composes the service status view
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `lbstats-domain`: request/result types, errors and port traits
//! - Pure Rust libraries for async, serialization and logging

pub mod domain_services;
pub mod ports;
pub mod sources;
pub mod use_cases;

pub use domain_services::*;
pub use ports::*;
pub use sources::*;
pub use use_cases::*;
