//! InfluxDB listen store
//!
//! Reads the total listen count with an InfluxQL query over the 1.x HTTP
//! `/query` API. The count is the last column of the first value row of the
//! first series.

use std::time::Duration;

use async_trait::async_trait;
use lbstats_application::ports::providers::ListenCountStore;
use lbstats_domain::error::{Error, Result, SourceKind};
use reqwest::Client;

use crate::constants::INFLUX_DEFAULT_COUNT_QUERY;
use crate::utils::HttpResponseUtils;

const PROVIDER: &str = "InfluxDB";

/// Listen store backed by InfluxDB
#[derive(Clone)]
pub struct InfluxListenStore {
    url: String,
    database: String,
    count_query: String,
    timeout: Duration,
    http_client: Client,
}

impl InfluxListenStore {
    pub fn new(
        url: String,
        database: String,
        count_query: Option<String>,
        timeout: Duration,
        http_client: Client,
    ) -> Self {
        Self {
            url,
            database,
            count_query: count_query
                .filter(|q| !q.trim().is_empty())
                .unwrap_or_else(|| INFLUX_DEFAULT_COUNT_QUERY.to_string()),
            timeout,
            http_client,
        }
    }

    fn parse_count(body: &serde_json::Value) -> Result<i64> {
        let result = &body["results"][0];
        if let Some(message) = result["error"].as_str() {
            return Err(Error::backing_store(
                SourceKind::ListenStore,
                format!("{PROVIDER} query error: {message}"),
            ));
        }

        let Some(series) = result["series"].get(0) else {
            // No points yet
            return Ok(0);
        };
        let Some(value) = series["values"][0].as_array().and_then(|row| row.last()) else {
            return Err(Error::backing_store(
                SourceKind::ListenStore,
                format!("{PROVIDER} returned no listen count"),
            ));
        };

        value.as_i64().or_else(|| value.as_f64().and_then(integral)).ok_or_else(|| {
            Error::backing_store(
                SourceKind::ListenStore,
                format!("{PROVIDER} listen count is not an integer: {value}"),
            )
        })
    }
}

/// Whole float within `i64` range
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn integral(f: f64) -> Option<i64> {
    // 2^63 is exactly representable; i64::MAX is not
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f)).then(|| f as i64)
}

impl std::fmt::Debug for InfluxListenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InfluxListenStore")
            .field("url", &self.url)
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ListenCountStore for InfluxListenStore {
    async fn total_listen_count(&self) -> Result<i64> {
        let response = self
            .http_client
            .get(format!("{}/query", self.url.trim_end_matches('/')))
            .query(&[("db", self.database.as_str()), ("q", self.count_query.as_str())])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                HttpResponseUtils::send_error(SourceKind::ListenStore, PROVIDER, self.timeout, e)
            })?;

        let body =
            HttpResponseUtils::check_and_parse(response, SourceKind::ListenStore, PROVIDER).await?;
        Self::parse_count(&body)
    }
}
