//! Dependency wiring
//!
//! Constructor injection only: clients are built from configuration and
//! handed to the application services as `Arc<dyn Trait>`.

pub mod bootstrap;

pub use bootstrap::*;
