//! Domain layer constants
//!
//! Values that are part of the aggregate contract itself. Deployment tunables
//! (URLs, pool sizes) live in `lbstats_infrastructure::constants`.

// ============================================================================
// CACHE KEY CONSTANTS
// ============================================================================

/// Namespace prefix for every cached statistic
pub const STATS_NAMESPACE: &str = "listenbrainz.stats";

/// Separator between namespace and metric name
pub const CACHE_KEY_SEPARATOR: char = '.';

/// Number of hex characters of the subject digest used in per-user keys
pub const SUBJECT_DIGEST_HEX_LEN: usize = 16;

/// Window token used in keys for "all time" requests
pub const ALL_TIME_TOKEN: &str = "all_time";

// ============================================================================
// AGGREGATE CONSTANTS
// ============================================================================

/// Time a computed statistic stays cached (10 minutes)
pub const STATS_CACHE_TTL_SECS: u64 = 600;

/// Default cap on rows returned by a top-N aggregate
pub const DEFAULT_ENTITY_LIMIT: usize = 100;

/// Upper bound on a single backing source call
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Value reported for a queue whose depth could not be probed
pub const UNKNOWN_QUEUE_DEPTH: i64 = -1;

/// Name of the bound parameter carrying the subject identifier
pub const SUBJECT_PARAMETER: &str = "subject_id";

/// Column holding the occurrence count in every top-N row
pub const LISTEN_COUNT_FIELD: &str = "listen_count";

// ============================================================================
// QUEUE CONSTANTS
// ============================================================================

/// Durable broker queue receiving raw listens
pub const INCOMING_QUEUE: &str = "incoming";

/// Durable broker queue receiving deduplicated listens
pub const UNIQUE_QUEUE: &str = "unique";

/// Metric name under which the importer list length is cached
pub const IMPORTER_QUEUE_METRIC: &str = "alpha_importer_queue_size";
