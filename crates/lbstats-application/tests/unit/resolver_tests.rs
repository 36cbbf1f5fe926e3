//! Tests for the aggregate resolver's cache-aside behavior

use std::sync::Arc;
use std::time::Duration;

use lbstats_application::domain_services::AggregateQueryBuilder;
use lbstats_application::ports::providers::SourceValue;
use lbstats_application::sources::{AnalyticalAggregateAdapter, QueueDepthAdapter};
use lbstats_application::use_cases::{AggregateResolver, ResolverSettings};
use lbstats_domain::error::{Error, SourceKind};
use lbstats_domain::value_objects::{
    AggregateKind, AggregateRequest, AggregateValue, FieldValue, listen_count,
};

use crate::doubles::{
    Behavior, CannedEngine, CountingSource, ManualClockCache, TableProbe, UnreachableCache,
    artist_row,
};

const TTL: Duration = Duration::from_secs(600);

fn resolver_with(
    cache: Arc<dyn lbstats_application::ports::CacheProvider>,
    source: Arc<CountingSource>,
) -> AggregateResolver {
    AggregateResolver::new(cache, ResolverSettings::default()).with_source(source)
}

fn queue_source(behavior: Behavior) -> Arc<CountingSource> {
    CountingSource::new(&[AggregateKind::QueueDepth], SourceKind::Broker, behavior)
}

#[tokio::test]
async fn user_count_populates_cache_with_fixed_ttl() {
    let cache = ManualClockCache::new();
    let source = CountingSource::user_count(42);
    let resolver = resolver_with(cache.clone(), source.clone());

    let scalar = resolver
        .scalar(&AggregateRequest::user_count())
        .await
        .unwrap();

    assert_eq!(scalar.value, 42);
    assert_eq!(scalar.key, "listenbrainz.stats.user_count");
    assert_eq!(
        cache.writes(),
        vec![(
            "listenbrainz.stats.user_count".to_string(),
            "42".to_string(),
            TTL
        )]
    );
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn repeated_calls_within_ttl_hit_the_cache() {
    let cache = ManualClockCache::new();
    let source = CountingSource::user_count(42);
    let resolver = resolver_with(cache.clone(), source.clone());

    for _ in 0..3 {
        let value = resolver.resolve(&AggregateRequest::user_count()).await.unwrap();
        assert_eq!(value, AggregateValue::Count(42));
        cache.advance(Duration::from_secs(120));
    }

    assert_eq!(source.calls(), 1);
    assert_eq!(cache.writes().len(), 1);
}

#[tokio::test]
async fn expired_entry_triggers_exactly_one_new_fetch() {
    let cache = ManualClockCache::new();
    let source = CountingSource::user_count(42);
    let resolver = resolver_with(cache.clone(), source.clone());
    let request = AggregateRequest::user_count();

    resolver.resolve(&request).await.unwrap();
    cache.advance(TTL + Duration::from_secs(1));
    source.set_behavior(Behavior::Value(SourceValue::Count(43)));

    assert_eq!(
        resolver.resolve(&request).await.unwrap(),
        AggregateValue::Count(43)
    );
    assert_eq!(
        resolver.resolve(&request).await.unwrap(),
        AggregateValue::Count(43)
    );
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn unreachable_cache_degrades_to_direct_fetch() {
    let cache = UnreachableCache::new();
    let source = CountingSource::user_count(42);
    let resolver = resolver_with(cache.clone(), source.clone());

    let value = resolver
        .resolve(&AggregateRequest::user_count())
        .await
        .unwrap();

    assert_eq!(value, AggregateValue::Count(42));
    assert_eq!(source.calls(), 1);
    // Write-through is skipped once the store is known to be down.
    assert_eq!(cache.write_attempts(), 0);
}

#[tokio::test]
async fn invalid_request_touches_neither_cache_nor_source() {
    let cache = ManualClockCache::new();
    let source = CountingSource::new(
        &[AggregateKind::TopArtists],
        SourceKind::Analytical,
        Behavior::Fail,
    );
    let resolver = resolver_with(cache.clone(), source.clone());

    let err = resolver
        .resolve(&AggregateRequest::top(AggregateKind::TopArtists, "  ", None))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation { .. }));
    assert_eq!(cache.lookups(), 0);
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn unreachable_broker_reports_unknown_depth_without_caching() {
    let cache = ManualClockCache::new();
    let source = queue_source(Behavior::Value(SourceValue::Unavailable));
    let resolver = resolver_with(cache.clone(), source.clone());
    let request = AggregateRequest::queue_depth("incoming");

    assert_eq!(resolver.scalar(&request).await.unwrap().value, -1);
    assert!(cache.writes().is_empty());

    source.set_behavior(Behavior::Value(SourceValue::Count(7)));
    assert_eq!(resolver.scalar(&request).await.unwrap().value, 7);
    assert_eq!(source.calls(), 2);
    assert_eq!(cache.writes()[0].0, "listenbrainz.stats.incoming_queue_size");
}

#[tokio::test]
async fn queue_names_differing_in_punctuation_are_cached_apart() {
    let cache = ManualClockCache::new();
    let probe = Arc::new(
        TableProbe::default()
            .with("listens.v2", 5)
            .with("listens_v2", 9),
    );
    let resolver = AggregateResolver::new(cache.clone(), ResolverSettings::default())
        .with_source(Arc::new(QueueDepthAdapter::new(probe.clone())));

    let dotted = resolver
        .scalar(&AggregateRequest::queue_depth("listens.v2"))
        .await
        .unwrap();
    let plain = resolver
        .scalar(&AggregateRequest::queue_depth("listens_v2"))
        .await
        .unwrap();

    assert_eq!(dotted.value, 5);
    assert_eq!(plain.value, 9);
    assert_ne!(dotted.key, plain.key);
    assert_eq!(plain.key, "listenbrainz.stats.listens_v2_queue_size");
    assert_eq!(probe.probed(), vec!["listens.v2", "listens_v2"]);
    assert_eq!(cache.writes().len(), 2);
}

#[tokio::test]
async fn failing_queue_probe_is_reported_as_unknown() {
    let resolver = resolver_with(ManualClockCache::new(), queue_source(Behavior::Fail));

    let scalar = resolver
        .scalar(&AggregateRequest::queue_depth("unique"))
        .await
        .unwrap();
    assert_eq!(scalar.value, -1);
}

#[tokio::test]
async fn relational_failure_propagates_and_is_not_cached() {
    let cache = ManualClockCache::new();
    let source = CountingSource::new(
        &[AggregateKind::UserCount],
        SourceKind::Relational,
        Behavior::Fail,
    );
    let resolver = resolver_with(cache.clone(), source);

    let err = resolver
        .resolve(&AggregateRequest::user_count())
        .await
        .unwrap_err();

    assert_eq!(err.source_kind(), Some(SourceKind::Relational));
    assert!(cache.writes().is_empty());
}

#[tokio::test(start_paused = true)]
async fn slow_source_times_out_as_backing_store_error() {
    let source = CountingSource::new(
        &[AggregateKind::UserCount],
        SourceKind::Relational,
        Behavior::Hang,
    );
    let settings = ResolverSettings {
        fetch_timeout: Duration::from_secs(5),
        ..ResolverSettings::default()
    };
    let resolver = AggregateResolver::new(ManualClockCache::new(), settings).with_source(source);

    let err = resolver
        .resolve(&AggregateRequest::user_count())
        .await
        .unwrap_err();

    assert_eq!(err.source_kind(), Some(SourceKind::Relational));
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test(start_paused = true)]
async fn slow_queue_probe_times_out_to_unknown_depth() {
    let settings = ResolverSettings {
        fetch_timeout: Duration::from_secs(5),
        ..ResolverSettings::default()
    };
    let resolver = AggregateResolver::new(ManualClockCache::new(), settings)
        .with_source(queue_source(Behavior::Hang));

    let scalar = resolver
        .scalar(&AggregateRequest::queue_depth("incoming"))
        .await
        .unwrap();
    assert_eq!(scalar.value, -1);
}

#[tokio::test]
async fn undecodable_cache_entry_is_treated_as_miss() {
    let cache = ManualClockCache::new();
    cache.seed("listenbrainz.stats.user_count", "not a number", TTL);
    let source = CountingSource::user_count(42);
    let resolver = resolver_with(cache.clone(), source.clone());

    let value = resolver
        .resolve(&AggregateRequest::user_count())
        .await
        .unwrap();

    assert_eq!(value, AggregateValue::Count(42));
    assert_eq!(source.calls(), 1);
    assert_eq!(cache.writes().len(), 1);
}

#[tokio::test]
async fn missing_source_is_an_internal_error() {
    let resolver = AggregateResolver::new(ManualClockCache::new(), ResolverSettings::default());

    assert!(!resolver.supports(AggregateKind::ListenCount));
    let err = resolver
        .resolve(&AggregateRequest::listen_count())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Internal { .. }));
}

#[tokio::test]
async fn top_entities_are_ordered_capped_and_cached() {
    let cache = ManualClockCache::new();
    let engine = Arc::new(CannedEngine::returning(vec![
        artist_row("Low", None, 3),
        artist_row("Björk", Some("0b9e5d0f-1f4e-4d5c-9c3a-3d2f1c0b9a8e"), 9),
        artist_row("Slint", None, 5),
        artist_row("Tortoise", None, 1),
    ]));
    let builder = AggregateQueryBuilder::new("listenbrainz", "listen", 3).unwrap();
    let resolver = AggregateResolver::new(cache.clone(), ResolverSettings::default())
        .with_source(Arc::new(AnalyticalAggregateAdapter::new(builder, engine.clone())));
    let request = AggregateRequest::top(
        AggregateKind::TopArtists,
        "alice",
        Some("7 DAY".parse().unwrap()),
    );

    let first = resolver.top_entities(&request).await.unwrap();
    let second = resolver.top_entities(&request).await.unwrap();

    let counts: Vec<i64> = first.rows().iter().map(listen_count).collect();
    assert_eq!(counts, vec![9, 5, 3]);
    assert!(matches!(first.rows()[0]["artist_msid"], FieldValue::Uuid(_)));
    assert_eq!(first.rows()[1]["artist_msid"], FieldValue::Null);
    assert_eq!(first, second);
    assert_eq!(engine.queries().len(), 1);

    let (key, _, ttl) = &cache.writes()[0];
    assert!(key.starts_with("listenbrainz.stats.top_artists.7_day."));
    assert_eq!(*ttl, TTL);
}

#[tokio::test]
async fn scalar_and_top_accessors_reject_the_wrong_shape() {
    let resolver = resolver_with(ManualClockCache::new(), CountingSource::user_count(1));

    let err = resolver
        .top_entities(&AggregateRequest::user_count())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}
