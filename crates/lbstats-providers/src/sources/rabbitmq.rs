//! RabbitMQ queue depth probe
//!
//! Talks to the broker's management HTTP API. Each probe first declares the
//! queue as durable (`PUT /api/queues/{vhost}/{name}`, idempotent for an
//! existing durable queue) and then reads its `messages` count.
//!
//! Any failure, from an unreachable broker to an unexpected body, is
//! logged and reported as [`QueueProbe::Unavailable`].

use std::time::Duration;

use async_trait::async_trait;
use lbstats_application::ports::providers::{QueueDepthProbe, QueueProbe};
use lbstats_domain::error::{Error, Result, SourceKind};
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use crate::constants::RABBITMQ_DEFAULT_VHOST;
use crate::utils::HttpResponseUtils;

const PROVIDER: &str = "RabbitMQ";

/// Connection settings for the management API
#[derive(Debug, Clone)]
pub struct RabbitMqSettings {
    /// Management API base URL, e.g. `http://localhost:15672`
    pub management_url: String,
    pub vhost: String,
    pub username: String,
    pub password: String,
}

impl Default for RabbitMqSettings {
    fn default() -> Self {
        Self {
            management_url: "http://localhost:15672".to_string(),
            vhost: RABBITMQ_DEFAULT_VHOST.to_string(),
            username: "guest".to_string(),
            password: "guest".to_string(),
        }
    }
}

/// Queue depth probe backed by the RabbitMQ management API
#[derive(Clone)]
pub struct RabbitMqQueueProbe {
    settings: RabbitMqSettings,
    timeout: Duration,
    http_client: Client,
}

impl RabbitMqQueueProbe {
    pub fn new(settings: RabbitMqSettings, timeout: Duration, http_client: Client) -> Self {
        Self {
            settings,
            timeout,
            http_client,
        }
    }

    fn queue_url(&self, queue: &str) -> String {
        format!(
            "{}/api/queues/{}/{}",
            self.settings.management_url.trim_end_matches('/'),
            urlencoding::encode(&self.settings.vhost),
            urlencoding::encode(queue)
        )
    }

    async fn declare(&self, url: &str) -> Result<()> {
        let response = self
            .http_client
            .put(url)
            .basic_auth(&self.settings.username, Some(&self.settings.password))
            .timeout(self.timeout)
            .json(&json!({ "durable": true }))
            .send()
            .await
            .map_err(|e| HttpResponseUtils::send_error(SourceKind::Broker, PROVIDER, self.timeout, e))?;

        // 201 Created or 204 No Content; neither carries a body
        if response.status().is_success() {
            Ok(())
        } else {
            HttpResponseUtils::check_and_parse(response, SourceKind::Broker, PROVIDER)
                .await
                .map(|_| ())
        }
    }

    async fn message_count(&self, url: &str) -> Result<u64> {
        let response = self
            .http_client
            .get(url)
            .basic_auth(&self.settings.username, Some(&self.settings.password))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| HttpResponseUtils::send_error(SourceKind::Broker, PROVIDER, self.timeout, e))?;

        let body = HttpResponseUtils::check_and_parse(response, SourceKind::Broker, PROVIDER).await?;
        // A freshly declared queue has no stats yet
        match body.get("messages") {
            None | Some(serde_json::Value::Null) => Ok(0),
            Some(value) => value.as_u64().ok_or_else(|| {
                Error::backing_store(
                    SourceKind::Broker,
                    format!("Queue message count is not a number: {value}"),
                )
            }),
        }
    }

    async fn try_probe(&self, queue: &str) -> Result<u64> {
        let url = self.queue_url(queue);
        self.declare(&url).await?;
        self.message_count(&url).await
    }
}

impl std::fmt::Debug for RabbitMqQueueProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RabbitMqQueueProbe")
            .field("management_url", &self.settings.management_url)
            .field("vhost", &self.settings.vhost)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl QueueDepthProbe for RabbitMqQueueProbe {
    async fn probe(&self, queue: &str) -> QueueProbe {
        match self.try_probe(queue).await {
            Ok(depth) => {
                debug!(queue, depth, "Probed broker queue");
                QueueProbe::Depth(depth)
            }
            Err(e) => {
                warn!(queue, error = %e, "Broker queue unavailable");
                QueueProbe::Unavailable
            }
        }
    }
}
