//! Composition root
//!
//! Builds every backing client from [`AppConfig`], wraps each in its
//! adapter and registers the adapters with one [`AggregateResolver`].
//!
//! ```text
//! AppConfig → cache registry (linkme) → AggregateResolver ← adapters ← clients
//!                                              ↑
//!                                        StatusService ← SysinfoLoadProvider
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let context = init_app(AppConfig::default())?;
//! let users = context.resolver().scalar(&AggregateRequest::user_count()).await?;
//! let status = context.status().current_status().await?;
//! ```
//!
//! All clients connect lazily, so building the context never touches the
//! network.

use std::sync::Arc;
use std::time::Duration;

use lbstats_application::domain_services::AggregateQueryBuilder;
use lbstats_application::ports::providers::CacheProvider;
use lbstats_application::ports::registry::{CacheProviderConfig, resolve_cache_provider};
use lbstats_application::sources::{
    AnalyticalAggregateAdapter, ImporterQueueAdapter, ListenCountAdapter, QueueDepthAdapter,
    RelationalCountAdapter,
};
use lbstats_application::use_cases::{
    AggregateResolver, ResolverSettings, StatusQueues, StatusService,
};
use lbstats_domain::error::{Error, Result};
use lbstats_providers::http::HttpClientConfig;
use lbstats_providers::sources::{
    BigQueryEngine, InfluxListenStore, PostgresPoolSettings, PostgresUserStore,
    RabbitMqQueueProbe, RabbitMqSettings, RedisListProbe,
};
use tracing::info;

use crate::config::AppConfig;
use crate::system::SysinfoLoadProvider;

/// Application context holding the wired services
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,
    resolver: Arc<AggregateResolver>,
    status: Arc<StatusService>,
}

impl AppContext {
    /// Resolver for single aggregates
    pub fn resolver(&self) -> Arc<AggregateResolver> {
        Arc::clone(&self.resolver)
    }

    /// Status view service
    pub fn status(&self) -> Arc<StatusService> {
        Arc::clone(&self.status)
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("cache", &self.resolver.cache().provider_name())
            .field("namespace", &self.resolver.cache().namespace())
            .finish_non_exhaustive()
    }
}

/// Resolve the configured cache backend from the provider registry
pub fn build_cache(config: &AppConfig) -> Result<Arc<dyn CacheProvider>> {
    let mut cache_config = CacheProviderConfig::new(config.cache.provider.as_str());
    if let Some(uri) = &config.cache.redis_url {
        cache_config = cache_config.with_uri(uri.as_str());
    }
    if let Some(capacity) = config.cache.max_capacity {
        cache_config = cache_config.with_max_capacity(capacity);
    }

    resolve_cache_provider(&cache_config).map_err(Error::configuration)
}

/// Build a resolver over `cache` with every backing source registered
pub fn build_resolver(
    config: &AppConfig,
    cache: Arc<dyn CacheProvider>,
) -> Result<AggregateResolver> {
    let fetch_timeout = config.stats.fetch_timeout();
    let http_client = HttpClientConfig::with_timeout(fetch_timeout).build()?;

    let users = PostgresUserStore::new(
        &config.database.url,
        &PostgresPoolSettings {
            max_connections: config.database.max_connections,
            min_idle: config.database.min_idle,
            connection_timeout: Duration::from_secs(config.database.connection_timeout_secs),
        },
    )?;

    let builder = AggregateQueryBuilder::new(
        &config.bigquery.dataset_id,
        &config.bigquery.table_id,
        config.stats.entity_limit,
    )?;
    let engine = BigQueryEngine::new(
        config.bigquery.api_base.clone(),
        config.bigquery.project_id.clone(),
        config.bigquery.access_token.clone(),
        fetch_timeout,
        http_client.clone(),
    );

    let broker = RabbitMqQueueProbe::new(
        RabbitMqSettings {
            management_url: config.broker.management_url.clone(),
            vhost: config.broker.vhost.clone(),
            username: config.broker.username.clone(),
            password: config.broker.password.clone(),
        },
        fetch_timeout,
        http_client.clone(),
    );

    let importer = RedisListProbe::new(&config.importer.redis_url)?;

    let listens = InfluxListenStore::new(
        config.influx.url.clone(),
        config.influx.database.clone(),
        config.influx.count_query.clone(),
        fetch_timeout,
        http_client,
    );

    let settings = ResolverSettings {
        namespace: config.cache.namespace.clone(),
        ttl: config.cache.ttl(),
        fetch_timeout,
    };

    Ok(AggregateResolver::new(cache, settings)
        .with_source(Arc::new(RelationalCountAdapter::new(Arc::new(users))))
        .with_source(Arc::new(AnalyticalAggregateAdapter::new(
            builder,
            Arc::new(engine),
        )))
        .with_source(Arc::new(QueueDepthAdapter::new(Arc::new(broker))))
        .with_source(Arc::new(ImporterQueueAdapter::new(
            Arc::new(importer),
            config.importer.queue_key.clone(),
        )))
        .with_source(Arc::new(ListenCountAdapter::new(Arc::new(listens)))))
}

/// Initialize the application context from configuration
pub fn init_app(config: AppConfig) -> Result<AppContext> {
    let cache = build_cache(&config)?;
    info!(
        provider = cache.provider_name(),
        namespace = %config.cache.namespace,
        ttl_secs = config.cache.ttl_secs,
        "Cache provider resolved"
    );

    let resolver = Arc::new(build_resolver(&config, cache)?);
    let status = Arc::new(StatusService::new(
        Arc::clone(&resolver),
        Arc::new(SysinfoLoadProvider),
        StatusQueues {
            incoming: config.broker.incoming_queue.clone(),
            unique: config.broker.unique_queue.clone(),
        },
    ));

    Ok(AppContext {
        config: Arc::new(config),
        resolver,
        status,
    })
}
