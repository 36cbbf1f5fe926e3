//! Status Service Use Case
//!
//! Composes the service status view. Fields are fetched concurrently through
//! the resolver and each follows its own failure policy:
//!
//! | Field | On failure |
//! |-------|-----------|
//! | `listen_count` | the whole status fails |
//! | `incoming_len`, `unique_len`, `importer_queue_size` | `-1` |
//! | `user_count` | `None` and a warning |

use std::sync::Arc;

use lbstats_domain::constants::{INCOMING_QUEUE, UNIQUE_QUEUE};
use lbstats_domain::error::Result;
use lbstats_domain::value_objects::AggregateRequest;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::aggregate_resolver::AggregateResolver;
use crate::ports::infrastructure::{LoadAverage, SystemLoadProvider};

/// Snapshot of service health
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentStatus {
    pub load: LoadAverage,
    pub listen_count: i64,
    pub incoming_len: i64,
    pub unique_len: i64,
    /// `None` when the relational store could not be queried
    pub user_count: Option<i64>,
    pub importer_queue_size: i64,
}

/// Broker queue names shown in the status view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusQueues {
    pub incoming: String,
    pub unique: String,
}

impl Default for StatusQueues {
    fn default() -> Self {
        Self {
            incoming: INCOMING_QUEUE.to_string(),
            unique: UNIQUE_QUEUE.to_string(),
        }
    }
}

/// Builds [`CurrentStatus`] from the resolver and the host load
pub struct StatusService {
    resolver: Arc<AggregateResolver>,
    load: Arc<dyn SystemLoadProvider>,
    queues: StatusQueues,
}

impl StatusService {
    pub fn new(
        resolver: Arc<AggregateResolver>,
        load: Arc<dyn SystemLoadProvider>,
        queues: StatusQueues,
    ) -> Self {
        Self {
            resolver,
            load,
            queues,
        }
    }

    async fn count(&self, request: AggregateRequest) -> Result<i64> {
        Ok(self.resolver.scalar(&request).await?.value)
    }

    /// Gather the current status
    pub async fn current_status(&self) -> Result<CurrentStatus> {
        let (listen_count, incoming_len, unique_len, user_count, importer_queue_size) = tokio::join!(
            self.count(AggregateRequest::listen_count()),
            self.count(AggregateRequest::queue_depth(self.queues.incoming.as_str())),
            self.count(AggregateRequest::queue_depth(self.queues.unique.as_str())),
            self.count(AggregateRequest::user_count()),
            self.count(AggregateRequest::importer_queue_size()),
        );

        let user_count = match user_count {
            Ok(count) => Some(count),
            Err(e) => {
                warn!(error = %e, "User count unavailable for status");
                None
            }
        };

        Ok(CurrentStatus {
            load: self.load.load_average(),
            listen_count: listen_count?,
            incoming_len: incoming_len?,
            unique_len: unique_len?,
            user_count,
            importer_queue_size: importer_queue_size?,
        })
    }
}
