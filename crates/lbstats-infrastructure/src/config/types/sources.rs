//! Backing store configuration types

use crate::constants::{
    DEFAULT_BIGQUERY_DATASET, DEFAULT_BIGQUERY_PROJECT, DEFAULT_BIGQUERY_TABLE,
    DEFAULT_BROKER_MANAGEMENT_URL, DEFAULT_BROKER_PASSWORD, DEFAULT_BROKER_USERNAME,
    DEFAULT_DATABASE_URL, DEFAULT_DB_CONNECTION_TIMEOUT_SECS, DEFAULT_DB_MAX_CONNECTIONS,
    DEFAULT_IMPORTER_QUEUE_KEY, DEFAULT_INFLUX_DATABASE, DEFAULT_INFLUX_URL, DEFAULT_REDIS_URL,
};
use lbstats_domain::constants::{INCOMING_QUEUE, UNIQUE_QUEUE};
use serde::{Deserialize, Serialize};

/// Relational database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_idle: u32,
    pub connection_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            min_idle: 0,
            connection_timeout_secs: DEFAULT_DB_CONNECTION_TIMEOUT_SECS,
        }
    }
}

/// Analytical engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BigQueryConfig {
    /// REST base URL; the public endpoint when unset
    pub api_base: Option<String>,
    pub project_id: String,
    pub dataset_id: String,
    pub table_id: String,
    /// OAuth bearer token
    pub access_token: Option<String>,
}

impl Default for BigQueryConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            project_id: DEFAULT_BIGQUERY_PROJECT.to_string(),
            dataset_id: DEFAULT_BIGQUERY_DATASET.to_string(),
            table_id: DEFAULT_BIGQUERY_TABLE.to_string(),
            access_token: None,
        }
    }
}

/// Message broker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// RabbitMQ management API URL
    pub management_url: String,
    pub vhost: String,
    pub username: String,
    pub password: String,
    pub incoming_queue: String,
    pub unique_queue: String,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            management_url: DEFAULT_BROKER_MANAGEMENT_URL.to_string(),
            vhost: "/".to_string(),
            username: DEFAULT_BROKER_USERNAME.to_string(),
            password: DEFAULT_BROKER_PASSWORD.to_string(),
            incoming_queue: INCOMING_QUEUE.to_string(),
            unique_queue: UNIQUE_QUEUE.to_string(),
        }
    }
}

/// Importer list configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImporterConfig {
    pub redis_url: String,
    /// Key of the Redis list holding pending imports
    pub queue_key: String,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            redis_url: DEFAULT_REDIS_URL.to_string(),
            queue_key: DEFAULT_IMPORTER_QUEUE_KEY.to_string(),
        }
    }
}

/// Time-series listen store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InfluxConfig {
    pub url: String,
    pub database: String,
    /// InfluxQL query returning the total count; the built-in query when unset
    pub count_query: Option<String>,
}

impl Default for InfluxConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_INFLUX_URL.to_string(),
            database: DEFAULT_INFLUX_DATABASE.to_string(),
            count_query: None,
        }
    }
}
