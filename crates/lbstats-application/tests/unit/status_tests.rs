//! Tests for the composite status view

use std::sync::Arc;

use lbstats_application::ports::infrastructure::{LoadAverage, SystemLoadProvider};
use lbstats_application::ports::providers::SourceValue;
use lbstats_application::use_cases::{
    AggregateResolver, ResolverSettings, StatusQueues, StatusService,
};
use lbstats_domain::error::SourceKind;
use lbstats_domain::value_objects::AggregateKind;

use crate::doubles::{Behavior, CountingSource, ManualClockCache};

struct FixedLoad;

impl SystemLoadProvider for FixedLoad {
    fn load_average(&self) -> LoadAverage {
        LoadAverage {
            one: 0.25,
            five: 0.5,
            fifteen: 0.75,
        }
    }
}

fn count_source(kind: &'static [AggregateKind], source: SourceKind, behavior: Behavior) -> Arc<CountingSource> {
    CountingSource::new(kind, source, behavior)
}

fn service(listens: Behavior, users: Behavior, queues: Behavior) -> StatusService {
    let resolver = AggregateResolver::new(ManualClockCache::new(), ResolverSettings::default())
        .with_source(count_source(
            &[AggregateKind::ListenCount],
            SourceKind::ListenStore,
            listens,
        ))
        .with_source(count_source(
            &[AggregateKind::UserCount],
            SourceKind::Relational,
            users,
        ))
        .with_source(count_source(
            &[AggregateKind::QueueDepth],
            SourceKind::Broker,
            queues.clone(),
        ))
        .with_source(count_source(
            &[AggregateKind::ImporterQueueSize],
            SourceKind::ImporterQueue,
            queues,
        ));

    StatusService::new(Arc::new(resolver), Arc::new(FixedLoad), StatusQueues::default())
}

#[tokio::test]
async fn status_collects_every_field() {
    let status = service(
        Behavior::Value(SourceValue::Count(1_000)),
        Behavior::Value(SourceValue::Count(50)),
        Behavior::Value(SourceValue::Count(3)),
    )
    .current_status()
    .await
    .unwrap();

    assert_eq!(status.listen_count, 1_000);
    assert_eq!(status.user_count, Some(50));
    assert_eq!(status.incoming_len, 3);
    assert_eq!(status.unique_len, 3);
    assert_eq!(status.importer_queue_size, 3);
    assert_eq!(status.load.to_string(), "0.25 0.50 0.75");
}

#[tokio::test]
async fn status_degrades_non_essential_fields() {
    let status = service(
        Behavior::Value(SourceValue::Count(1_000)),
        Behavior::Fail,
        Behavior::Value(SourceValue::Unavailable),
    )
    .current_status()
    .await
    .unwrap();

    assert_eq!(status.listen_count, 1_000);
    assert_eq!(status.user_count, None);
    assert_eq!(status.incoming_len, -1);
    assert_eq!(status.unique_len, -1);
    assert_eq!(status.importer_queue_size, -1);
}

#[tokio::test]
async fn status_fails_without_listen_count() {
    let err = service(
        Behavior::Fail,
        Behavior::Value(SourceValue::Count(50)),
        Behavior::Value(SourceValue::Count(3)),
    )
    .current_status()
    .await
    .unwrap_err();

    assert_eq!(err.source_kind(), Some(SourceKind::ListenStore));
}
