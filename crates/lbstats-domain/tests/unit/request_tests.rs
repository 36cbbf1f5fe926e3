//! Tests for aggregate requests and cache key derivation

use lbstats_domain::constants::STATS_NAMESPACE;
use lbstats_domain::{AggregateKind, AggregateRequest, Error, TimeWindow};

#[test]
fn test_scalar_keys_match_well_known_names() {
    assert_eq!(
        AggregateRequest::user_count().cache_key(STATS_NAMESPACE),
        "listenbrainz.stats.user_count"
    );
    assert_eq!(
        AggregateRequest::importer_queue_size().cache_key(STATS_NAMESPACE),
        "listenbrainz.stats.alpha_importer_queue_size"
    );
    assert_eq!(
        AggregateRequest::listen_count().cache_key(STATS_NAMESPACE),
        "listenbrainz.stats.listen_count"
    );
    assert_eq!(
        AggregateRequest::queue_depth("incoming").cache_key(STATS_NAMESPACE),
        "listenbrainz.stats.incoming_queue_size"
    );
}

#[test]
fn test_top_n_keys_are_deterministic_and_distinct() {
    let week: TimeWindow = "7 DAY".parse().unwrap();
    let a = AggregateRequest::top(AggregateKind::TopArtists, "alice", Some(week));
    let b = AggregateRequest::top(AggregateKind::TopArtists, "alice", Some(week));
    let all_time = AggregateRequest::top(AggregateKind::TopArtists, "alice", None);
    let other_user = AggregateRequest::top(AggregateKind::TopArtists, "bob", Some(week));
    let other_kind = AggregateRequest::top(AggregateKind::TopReleases, "alice", Some(week));

    let key = a.cache_key(STATS_NAMESPACE);
    assert_eq!(key, b.cache_key(STATS_NAMESPACE));
    assert!(key.starts_with("listenbrainz.stats.top_artists.7_day."));
    assert!(
        all_time
            .cache_key(STATS_NAMESPACE)
            .starts_with("listenbrainz.stats.top_artists.all_time.")
    );
    assert_ne!(key, other_user.cache_key(STATS_NAMESPACE));
    assert_ne!(key, other_kind.cache_key(STATS_NAMESPACE));
}

#[test]
fn test_top_n_keys_stay_ascii_for_any_subject() {
    let request = AggregateRequest::top(AggregateKind::TopRecordings, "ünïcödé user.name", None);
    let key = request.cache_key(STATS_NAMESPACE);
    assert!(key.is_ascii());
    assert_eq!(key.split('.').count(), 5);
}

#[test]
fn test_missing_subject_is_rejected() {
    for kind in [
        AggregateKind::TopRecordings,
        AggregateKind::TopArtists,
        AggregateKind::TopReleases,
        AggregateKind::QueueDepth,
    ] {
        let err = AggregateRequest::new(kind, "  ", None).validate().unwrap_err();
        assert!(matches!(err, Error::Validation { .. }), "{kind} accepted blank subject");
    }
}

#[test]
fn test_subjectless_kinds_validate() {
    assert!(AggregateRequest::user_count().validate().is_ok());
    assert!(AggregateRequest::listen_count().validate().is_ok());
    assert!(AggregateRequest::importer_queue_size().validate().is_ok());
}

#[test]
fn test_window_only_allowed_for_top_n() {
    let window: TimeWindow = "1 MONTH".parse().unwrap();
    let request = AggregateRequest::new(AggregateKind::UserCount, "", Some(window));
    assert!(matches!(request.validate(), Err(Error::Validation { .. })));
}

#[test]
fn test_kind_policies() {
    assert!(AggregateKind::QueueDepth.uses_queue_sentinel());
    assert!(AggregateKind::ImporterQueueSize.uses_queue_sentinel());
    assert!(!AggregateKind::UserCount.uses_queue_sentinel());
    assert!(!AggregateKind::ListenCount.uses_queue_sentinel());
    assert_eq!(
        AggregateKind::ALL.iter().filter(|k| k.is_top_n()).count(),
        3
    );
}
