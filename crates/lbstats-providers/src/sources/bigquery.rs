//! BigQuery analytical engine
//!
//! Runs parameterized aggregate queries through the BigQuery REST
//! `jobs.query` endpoint using standard SQL and named parameters.
//! Returned cells are strings or null; typing happens in the adapter.

use std::time::Duration;

use async_trait::async_trait;
use lbstats_application::ports::providers::{AnalyticalEngine, EngineRow};
use lbstats_domain::error::{Error, Result, SourceKind};
use lbstats_domain::value_objects::AggregateQuery;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::constants::{BIGQUERY_DEFAULT_API_BASE, BIGQUERY_QUERY_TIMEOUT_MS, CONTENT_TYPE_JSON};
use crate::utils::HttpResponseUtils;

const PROVIDER: &str = "BigQuery";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResponse {
    #[serde(default)]
    job_complete: bool,
    schema: Option<Schema>,
    #[serde(default)]
    rows: Vec<Row>,
}

#[derive(Debug, Deserialize)]
struct Schema {
    fields: Vec<Field>,
}

#[derive(Debug, Deserialize)]
struct Field {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Row {
    f: Vec<Cell>,
}

#[derive(Debug, Deserialize)]
struct Cell {
    v: serde_json::Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NamedParameter<'a> {
    name: &'a str,
    parameter_type: serde_json::Value,
    parameter_value: serde_json::Value,
}

/// BigQuery REST client
#[derive(Clone)]
pub struct BigQueryEngine {
    api_base: String,
    project_id: String,
    access_token: Option<String>,
    timeout: Duration,
    http_client: Client,
}

impl BigQueryEngine {
    /// Create a new BigQuery client
    ///
    /// # Arguments
    /// * `api_base` - REST base URL, defaults to the public endpoint
    /// * `project_id` - Project the query jobs are billed to
    /// * `access_token` - OAuth bearer token
    /// * `timeout` - Request timeout duration
    /// * `http_client` - Shared reqwest client
    pub fn new(
        api_base: Option<String>,
        project_id: String,
        access_token: Option<String>,
        timeout: Duration,
        http_client: Client,
    ) -> Self {
        Self {
            api_base: api_base
                .filter(|base| !base.trim().is_empty())
                .unwrap_or_else(|| BIGQUERY_DEFAULT_API_BASE.to_string()),
            project_id,
            access_token: access_token.filter(|token| !token.is_empty()),
            timeout,
            http_client,
        }
    }

    /// Get the base URL for this client
    pub fn api_base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }

    fn request_body(query: &AggregateQuery) -> serde_json::Value {
        let parameters: Vec<NamedParameter<'_>> = query
            .parameters
            .iter()
            .map(|p| NamedParameter {
                name: &p.name,
                parameter_type: json!({ "type": p.parameter_type.to_string() }),
                parameter_value: json!({ "value": p.value }),
            })
            .collect();

        json!({
            "query": query.sql,
            "useLegacySql": false,
            "parameterMode": "NAMED",
            "timeoutMs": BIGQUERY_QUERY_TIMEOUT_MS,
            "queryParameters": parameters,
        })
    }

    fn into_rows(response: QueryResponse) -> Result<Vec<EngineRow>> {
        if !response.job_complete {
            return Err(Error::backing_store(
                SourceKind::Analytical,
                "BigQuery job did not complete before the server timeout",
            ));
        }
        let fields = response.schema.map(|s| s.fields).unwrap_or_default();

        Ok(response
            .rows
            .into_iter()
            .map(|row| {
                fields
                    .iter()
                    .zip(row.f)
                    .map(|(field, cell)| {
                        let value = match cell.v {
                            serde_json::Value::Null => None,
                            serde_json::Value::String(text) => Some(text),
                            other => Some(other.to_string()),
                        };
                        (field.name.clone(), value)
                    })
                    .collect()
            })
            .collect())
    }
}

impl std::fmt::Debug for BigQueryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BigQueryEngine")
            .field("api_base", &self.api_base)
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AnalyticalEngine for BigQueryEngine {
    async fn run_query(&self, query: &AggregateQuery) -> Result<Vec<EngineRow>> {
        debug!(kind = %query.kind, "Running BigQuery aggregate");

        let mut request = self
            .http_client
            .post(format!(
                "{}/projects/{}/queries",
                self.api_base(),
                self.project_id
            ))
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.timeout)
            .json(&Self::request_body(query));
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            HttpResponseUtils::send_error(SourceKind::Analytical, PROVIDER, self.timeout, e)
        })?;

        let body = HttpResponseUtils::check_and_parse(response, SourceKind::Analytical, PROVIDER)
            .await?;
        let parsed: QueryResponse = serde_json::from_value(body).map_err(|e| {
            Error::backing_store_with_source(
                SourceKind::Analytical,
                "Unexpected BigQuery response",
                e,
            )
        })?;

        Self::into_rows(parsed)
    }
}
