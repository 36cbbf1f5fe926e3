//! Main application configuration

use serde::{Deserialize, Serialize};

pub use super::cache::{CacheConfig, StatsConfig};
pub use super::logging::LoggingConfig;
pub use super::sources::{
    BigQueryConfig, BrokerConfig, DatabaseConfig, ImporterConfig, InfluxConfig,
};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Cache backend and key settings
    pub cache: CacheConfig,
    /// Aggregate limits and timeouts
    pub stats: StatsConfig,
    /// Relational user store
    pub database: DatabaseConfig,
    /// Analytical engine
    pub bigquery: BigQueryConfig,
    /// Message broker
    pub broker: BrokerConfig,
    /// Importer list
    pub importer: ImporterConfig,
    /// Time-series listen store
    pub influx: InfluxConfig,
}
