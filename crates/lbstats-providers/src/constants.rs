//! Provider Constants
//!
//! Constants specific to provider implementations. These are separated from
//! domain constants (which live in lbstats-domain) and infrastructure constants.

// ============================================================================
// CACHE PROVIDER CONSTANTS
// ============================================================================

/// Default number of entries held by the in-memory cache
pub const CACHE_DEFAULT_MAX_CAPACITY: u64 = 10_000;

/// Redis default port
pub const REDIS_DEFAULT_PORT: u16 = 6379;

// ============================================================================
// HTTP CONSTANTS
// ============================================================================

/// Content-Type header value for JSON
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Error message prefix for request timeouts
pub const ERROR_MSG_REQUEST_TIMEOUT: &str = "Request timed out after";

// ============================================================================
// BACKING STORE CONSTANTS
// ============================================================================

/// Default BigQuery REST endpoint
pub const BIGQUERY_DEFAULT_API_BASE: &str = "https://bigquery.googleapis.com/bigquery/v2";

/// Server-side wait for a BigQuery query before it reports incomplete
pub const BIGQUERY_QUERY_TIMEOUT_MS: u64 = 30_000;

/// Default RabbitMQ virtual host
pub const RABBITMQ_DEFAULT_VHOST: &str = "/";

/// Relational count of registered users
pub const USER_COUNT_SQL: &str = r#"SELECT COUNT(*) FROM "user""#;

/// Default InfluxQL query for the total listen count
pub const INFLUX_DEFAULT_COUNT_QUERY: &str = "SELECT count FROM listen_count ORDER BY time DESC LIMIT 1";
