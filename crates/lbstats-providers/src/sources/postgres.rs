//! PostgreSQL user store
//!
//! Counts registered users through an r2d2 connection pool. The postgres
//! client is blocking, so each query runs on the blocking thread pool; the
//! pooled connection is returned when the closure exits, on every path.

use std::time::Duration;

use async_trait::async_trait;
use lbstats_application::ports::providers::UserCountStore;
use lbstats_domain::error::{Error, Result, SourceKind};
use r2d2::Pool;
use r2d2_postgres::{PostgresConnectionManager, postgres::NoTls};

use crate::constants::USER_COUNT_SQL;

/// Pool sizing for [`PostgresUserStore`]
#[derive(Debug, Clone)]
pub struct PostgresPoolSettings {
    pub max_connections: u32,
    pub min_idle: u32,
    pub connection_timeout: Duration,
}

impl Default for PostgresPoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 4,
            min_idle: 0,
            connection_timeout: Duration::from_secs(5),
        }
    }
}

/// User store backed by the relational database
#[derive(Clone)]
pub struct PostgresUserStore {
    pool: Pool<PostgresConnectionManager<NoTls>>,
}

impl PostgresUserStore {
    /// Create the store; connections are opened lazily on first use
    pub fn new(url: &str, settings: &PostgresPoolSettings) -> Result<Self> {
        let config = url
            .parse()
            .map_err(|e| Error::configuration_with_source("Invalid database URL", e))?;
        let manager = PostgresConnectionManager::new(config, NoTls);

        let pool = Pool::builder()
            .max_size(settings.max_connections)
            .min_idle(Some(settings.min_idle))
            .connection_timeout(settings.connection_timeout)
            .build_unchecked(manager);

        Ok(Self { pool })
    }
}

impl std::fmt::Debug for PostgresUserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.pool.state();
        f.debug_struct("PostgresUserStore")
            .field("connections", &state.connections)
            .field("idle_connections", &state.idle_connections)
            .finish()
    }
}

#[async_trait]
impl UserCountStore for PostgresUserStore {
    async fn count_users(&self) -> Result<i64> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                Error::backing_store_with_source(
                    SourceKind::Relational,
                    "Failed to get database connection",
                    e,
                )
            })?;
            let row = conn.query_one(USER_COUNT_SQL, &[]).map_err(|e| {
                Error::backing_store_with_source(SourceKind::Relational, "User count query failed", e)
            })?;
            row.try_get::<_, i64>(0).map_err(|e| {
                Error::backing_store_with_source(SourceKind::Relational, "Unexpected count column", e)
            })
        })
        .await
        .map_err(|e| Error::internal(format!("User count task failed: {e}")))?
    }
}
