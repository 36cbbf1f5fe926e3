//! Composition root tests
//!
//! Every client connects lazily, so the default configuration wires up
//! without any backing service running.

use lbstats_domain::error::Error;
use lbstats_domain::value_objects::AggregateKind;
use lbstats_infrastructure::config::AppConfig;
use lbstats_infrastructure::di::{build_cache, init_app};

#[test]
fn test_default_config_registers_every_kind() {
    let context = init_app(AppConfig::default()).unwrap();
    let resolver = context.resolver();

    for kind in [
        AggregateKind::TopRecordings,
        AggregateKind::TopArtists,
        AggregateKind::TopReleases,
        AggregateKind::UserCount,
        AggregateKind::QueueDepth,
        AggregateKind::ListenCount,
        AggregateKind::ImporterQueueSize,
    ] {
        assert!(resolver.supports(kind), "no source for {kind}");
    }
    assert_eq!(resolver.cache().provider_name(), "moka");
    assert_eq!(resolver.cache().namespace(), "listenbrainz.stats");
}

#[test]
fn test_null_cache_is_selectable() {
    let mut config = AppConfig::default();
    config.cache.provider = "null".to_string();

    assert_eq!(build_cache(&config).unwrap().provider_name(), "null");
}

#[test]
fn test_unknown_cache_provider_is_configuration_error() {
    let mut config = AppConfig::default();
    config.cache.provider = "memcached".to_string();

    let err = init_app(config).unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
    assert!(err.to_string().contains("memcached"), "{err}");
}

#[test]
fn test_untrusted_table_name_is_rejected() {
    let mut config = AppConfig::default();
    config.bigquery.table_id = "listen`; DROP TABLE user; --".to_string();

    let err = init_app(config).unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}
