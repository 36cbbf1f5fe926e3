//! # lbstats Domain Layer
//!
//! Core types for cache-backed aggregate retrieval: what can be requested,
//! what comes back, how it fails, and the ports the outer layers implement.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error taxonomy (cache unavailable, miss, backing store, validation) |
//! | [`value_objects`] | Requests, results, windows and queries |
//! | [`ports`] | Cache and backing source traits |
//! | [`constants`] | Key namespace, TTL, entity limit, queue names |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result, SourceKind};
pub use value_objects::*;
