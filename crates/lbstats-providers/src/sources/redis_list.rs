//! Redis list length probe
//!
//! Reports the length of a Redis list with `LLEN`. A missing key is an empty
//! list; connection or command failures are reported as
//! [`QueueProbe::Unavailable`].

use async_trait::async_trait;
use lbstats_application::ports::providers::{QueueDepthProbe, QueueProbe};
use lbstats_domain::error::{Error, Result};
use redis::{AsyncCommands, Client};
use tracing::warn;

/// Queue depth probe over Redis lists
#[derive(Clone)]
pub struct RedisListProbe {
    client: Client,
}

impl RedisListProbe {
    /// Create the probe; does not connect until the first probe
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| {
            Error::configuration_with_source(format!("Invalid Redis URL '{connection_string}'"), e)
        })?;
        Ok(Self { client })
    }

    async fn list_length(&self, key: &str) -> redis::RedisResult<u64> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.llen(key).await
    }
}

impl std::fmt::Debug for RedisListProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisListProbe")
            .field("server", &self.client.get_connection_info().addr)
            .finish()
    }
}

#[async_trait]
impl QueueDepthProbe for RedisListProbe {
    async fn probe(&self, queue: &str) -> QueueProbe {
        match self.list_length(queue).await {
            Ok(length) => QueueProbe::Depth(length),
            Err(e) => {
                warn!(key = queue, error = %e, "Redis list unavailable");
                QueueProbe::Unavailable
            }
        }
    }
}
