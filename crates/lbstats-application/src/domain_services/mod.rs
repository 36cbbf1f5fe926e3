//! Domain services
//!
//! Pure logic with no I/O, used by the backing source adapters.

/// Top-N analytical query construction
pub mod query_builder;

pub use query_builder::AggregateQueryBuilder;
