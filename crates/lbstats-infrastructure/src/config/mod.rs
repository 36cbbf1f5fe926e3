//! Configuration management
//!
//! Layered configuration: built-in defaults, then a TOML file, then
//! `LBSTATS__`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::*;
