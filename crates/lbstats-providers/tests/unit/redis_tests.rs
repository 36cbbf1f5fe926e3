//! Tests for the Redis cache provider and list probe

use std::time::Duration;

use lbstats_application::ports::providers::{
    CacheEntryConfig, CacheProvider, QueueDepthProbe, QueueProbe,
};
use lbstats_providers::cache::RedisCacheProvider;
use lbstats_providers::sources::RedisListProbe;

/// Nothing listens on port 1
const UNREACHABLE_REDIS: &str = "redis://127.0.0.1:1";

fn live_redis_url() -> String {
    std::env::var("LBSTATS_TEST_REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string())
}

#[tokio::test]
async fn test_unreachable_cache_reports_unavailable() {
    let provider = RedisCacheProvider::new(UNREACHABLE_REDIS).unwrap();

    let err = provider.exists("listenbrainz.stats.user_count").await.unwrap_err();
    assert!(err.is_cache_unavailable(), "{err}");

    let err = provider
        .set_json("listenbrainz.stats.user_count", "42", CacheEntryConfig::default())
        .await
        .unwrap_err();
    assert!(err.is_cache_unavailable(), "{err}");
}

#[tokio::test]
async fn test_unreachable_list_is_unavailable() {
    let probe = RedisListProbe::new(UNREACHABLE_REDIS).unwrap();
    assert_eq!(probe.probe("importer").await, QueueProbe::Unavailable);
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_live_setex_roundtrip_and_expiry() {
    let provider = RedisCacheProvider::new(&live_redis_url()).unwrap();
    let key = "lbstats.test.setex";

    provider
        .set_json(key, "7", CacheEntryConfig::default().with_ttl(Duration::from_secs(1)))
        .await
        .unwrap();
    assert!(provider.exists(key).await.unwrap());
    assert_eq!(provider.get_json(key).await.unwrap().as_deref(), Some("7"));

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(!provider.exists(key).await.unwrap());
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_live_missing_list_is_empty() {
    let probe = RedisListProbe::new(&live_redis_url()).unwrap();
    assert_eq!(
        probe.probe("lbstats.test.no_such_list").await,
        QueueProbe::Depth(0)
    );
}
