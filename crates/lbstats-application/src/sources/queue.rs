//! Queue depth adapters
//!
//! Both adapters report an unreachable queue as [`SourceValue::Unavailable`]
//! and never fail.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use lbstats_domain::error::{Result, SourceKind};
use lbstats_domain::value_objects::{AggregateKind, AggregateRequest};

use crate::ports::providers::{BackingSource, QueueDepthProbe, QueueProbe, SourceValue};

fn probe_value(probe: QueueProbe) -> SourceValue {
    match probe {
        QueueProbe::Depth(depth) => SourceValue::Count(i64::try_from(depth).unwrap_or(i64::MAX)),
        QueueProbe::Unavailable => SourceValue::Unavailable,
    }
}

/// Serves `QueueDepth` for the broker queue named by the request subject
#[derive(Clone)]
pub struct QueueDepthAdapter {
    probe: Arc<dyn QueueDepthProbe>,
}

impl QueueDepthAdapter {
    pub fn new(probe: Arc<dyn QueueDepthProbe>) -> Self {
        Self { probe }
    }
}

impl fmt::Debug for QueueDepthAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueDepthAdapter").finish_non_exhaustive()
    }
}

#[async_trait]
impl BackingSource for QueueDepthAdapter {
    fn kinds(&self) -> &'static [AggregateKind] {
        &[AggregateKind::QueueDepth]
    }

    fn source_kind(&self) -> SourceKind {
        SourceKind::Broker
    }

    async fn fetch(&self, request: &AggregateRequest) -> Result<SourceValue> {
        Ok(probe_value(self.probe.probe(request.subject()).await))
    }
}

/// Serves `ImporterQueueSize` from a fixed list key
#[derive(Clone)]
pub struct ImporterQueueAdapter {
    probe: Arc<dyn QueueDepthProbe>,
    queue_key: String,
}

impl ImporterQueueAdapter {
    pub fn new(probe: Arc<dyn QueueDepthProbe>, queue_key: impl Into<String>) -> Self {
        Self {
            probe,
            queue_key: queue_key.into(),
        }
    }
}

impl fmt::Debug for ImporterQueueAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImporterQueueAdapter")
            .field("queue_key", &self.queue_key)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl BackingSource for ImporterQueueAdapter {
    fn kinds(&self) -> &'static [AggregateKind] {
        &[AggregateKind::ImporterQueueSize]
    }

    fn source_kind(&self) -> SourceKind {
        SourceKind::ImporterQueue
    }

    async fn fetch(&self, _request: &AggregateRequest) -> Result<SourceValue> {
        Ok(probe_value(self.probe.probe(&self.queue_key).await))
    }
}
