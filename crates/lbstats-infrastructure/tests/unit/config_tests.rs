//! Configuration loading and validation tests
//!
//! Loader tests run inside `figment::Jail`, which serializes tests that touch
//! the process environment and gives each one a scratch working directory.

use figment::Jail;
use lbstats_domain::error::Error;
use lbstats_infrastructure::config::loader::to_toml;
use lbstats_infrastructure::config::{AppConfig, ConfigLoader};

#[test]
fn test_defaults_match_the_stats_contract() {
    let config = AppConfig::default();

    assert_eq!(config.cache.provider, "moka");
    assert_eq!(config.cache.namespace, "listenbrainz.stats");
    assert_eq!(config.cache.ttl_secs, 600);
    assert_eq!(config.stats.entity_limit, 100);
    assert_eq!(config.broker.incoming_queue, "incoming");
    assert_eq!(config.broker.unique_queue, "unique");
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_file_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "custom.toml",
            r#"
[cache]
provider = "redis"
redis_url = "redis://cache.internal:6379"
ttl_secs = 120

[stats]
entity_limit = 25

[bigquery]
project_id = "lb-prod"
"#,
        )?;

        let config = ConfigLoader::new()
            .with_config_path(jail.directory().join("custom.toml"))
            .load()
            .map_err(|e| e.to_string())?;

        assert_eq!(config.cache.provider, "redis");
        assert_eq!(
            config.cache.redis_url.as_deref(),
            Some("redis://cache.internal:6379")
        );
        assert_eq!(config.cache.ttl_secs, 120);
        assert_eq!(config.stats.entity_limit, 25);
        assert_eq!(config.bigquery.project_id, "lb-prod");
        // Untouched sections keep their defaults
        assert_eq!(config.bigquery.table_id, "listen");
        assert_eq!(config.cache.namespace, "listenbrainz.stats");
        Ok(())
    });
}

#[test]
fn test_missing_explicit_file_falls_back_to_defaults() {
    Jail::expect_with(|jail| {
        let config = ConfigLoader::new()
            .with_config_path(jail.directory().join("absent.toml"))
            .load()
            .map_err(|e| e.to_string())?;
        assert_eq!(config.cache.ttl_secs, 600);
        Ok(())
    });
}

#[test]
fn test_environment_overrides_discovered_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "lbstats.toml",
            r#"
[stats]
entity_limit = 25
fetch_timeout_secs = 10
"#,
        )?;
        jail.set_env("LBSTATS__STATS__ENTITY_LIMIT", "50");
        jail.set_env("LBSTATS__IMPORTER__QUEUE_KEY", "importer_list");

        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;

        assert_eq!(config.stats.entity_limit, 50);
        assert_eq!(config.stats.fetch_timeout_secs, 10);
        assert_eq!(config.importer.queue_key, "importer_list");
        Ok(())
    });
}

#[test]
fn test_zero_ttl_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("LBSTATS__CACHE__TTL_SECS", "0");

        let err = ConfigLoader::new().load().unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("TTL"), "{err}");
        Ok(())
    });
}

#[test]
fn test_invalid_limits_are_rejected() {
    Jail::expect_with(|jail| {
        for (case, body) in [
            ("entity limit", "[stats]\nentity_limit = 0\n"),
            ("fetch timeout", "[stats]\nfetch_timeout_secs = 0\n"),
            ("empty namespace", "[cache]\nnamespace = \"\"\n"),
            ("spaced namespace", "[cache]\nnamespace = \"listen brainz\"\n"),
        ] {
            jail.create_file("case.toml", body)?;
            let err = ConfigLoader::new()
                .with_config_path(jail.directory().join("case.toml"))
                .load()
                .unwrap_err();
            assert!(matches!(err, Error::Configuration { .. }), "{case}: {err}");
        }
        Ok(())
    });
}

#[test]
fn test_malformed_value_is_configuration_error() {
    Jail::expect_with(|jail| {
        jail.create_file("lbstats.toml", "[stats]\nentity_limit = \"lots\"\n")?;

        let err = ConfigLoader::new().load().unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        Ok(())
    });
}

#[test]
fn test_saved_sample_loads_back() {
    Jail::expect_with(|_jail| {
        let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
        let path = dir.path().join("lbstats.toml");

        let mut config = AppConfig::default();
        config.cache.provider = "null".to_string();
        config.stats.entity_limit = 10;

        let loader = ConfigLoader::new().with_config_path(&path);
        loader.save_to_file(&config, &path).map_err(|e| e.to_string())?;
        let loaded = loader.load().map_err(|e| e.to_string())?;

        assert_eq!(loaded.cache.provider, "null");
        assert_eq!(loaded.stats.entity_limit, 10);
        assert!(to_toml(&loaded).map_err(|e| e.to_string())?.contains("[broker]"));
        Ok(())
    });
}
