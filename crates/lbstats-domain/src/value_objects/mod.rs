//! Domain Value Objects
//!
//! Immutable value objects describing what a caller asks for and what the
//! backing sources hand back.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`AggregateRequest`] | Kind, subject and window of one requested metric |
//! | [`AggregateResult`] | Count-ordered, limit-capped top-N rows |
//! | [`ScalarAggregate`] | Single count with its cache key |
//! | [`TimeWindow`] | Validated relative interval literal |
//! | [`AggregateQuery`] | Query text with typed, bound parameters |

/// Aggregate requests, rows and values
pub mod aggregate;
/// Parameterized analytical queries
pub mod query;
/// Relative time windows
pub mod window;

pub use aggregate::{
    AggregateKind, AggregateRequest, AggregateResult, AggregateRow, AggregateValue, FieldValue,
    ScalarAggregate, listen_count,
};
pub use query::{AggregateQuery, ColumnSpec, ColumnType, ParameterType, QueryParameter};
pub use window::{IntervalUnit, TimeWindow};
