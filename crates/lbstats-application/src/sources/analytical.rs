//! Analytical top-N adapter
//!
//! Builds the query for the request, runs it on the engine and maps the
//! untyped engine cells into row fields using the template's column specs.
//! The result is re-sorted and capped regardless of what the engine returned.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use lbstats_domain::error::{Error, Result, SourceKind};
use lbstats_domain::value_objects::{
    AggregateKind, AggregateRequest, AggregateResult, AggregateRow, ColumnSpec, ColumnType,
    FieldValue,
};
use uuid::Uuid;

use super::backing_error;
use crate::domain_services::AggregateQueryBuilder;
use crate::ports::providers::{AnalyticalEngine, BackingSource, EngineRow, SourceValue};

/// Serves the top-N kinds from the analytical engine
#[derive(Clone)]
pub struct AnalyticalAggregateAdapter {
    builder: AggregateQueryBuilder,
    engine: Arc<dyn AnalyticalEngine>,
}

impl AnalyticalAggregateAdapter {
    pub fn new(builder: AggregateQueryBuilder, engine: Arc<dyn AnalyticalEngine>) -> Self {
        Self { builder, engine }
    }
}

impl fmt::Debug for AnalyticalAggregateAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyticalAggregateAdapter")
            .field("builder", &self.builder)
            .finish_non_exhaustive()
    }
}

fn map_cell(column: &ColumnSpec, raw: Option<&String>) -> Result<FieldValue> {
    let Some(raw) = raw else {
        return Ok(FieldValue::Null);
    };
    match column.column_type {
        ColumnType::Text => Ok(FieldValue::Text(raw.clone())),
        ColumnType::Uuid => Ok(Uuid::parse_str(raw)
            .map_or_else(|_| FieldValue::Text(raw.clone()), FieldValue::Uuid)),
        ColumnType::Count => raw.trim().parse::<i64>().map(FieldValue::Count).map_err(|_| {
            Error::backing_store(
                SourceKind::Analytical,
                format!("Column '{}' is not an integer: {raw:?}", column.name),
            )
        }),
    }
}

fn map_row(row: &EngineRow, columns: &[ColumnSpec]) -> Result<AggregateRow> {
    columns
        .iter()
        .map(|column| {
            let raw = row.get(column.name).and_then(Option::as_ref);
            Ok((column.name.to_string(), map_cell(column, raw)?))
        })
        .collect()
}

#[async_trait]
impl BackingSource for AnalyticalAggregateAdapter {
    fn kinds(&self) -> &'static [AggregateKind] {
        &[
            AggregateKind::TopRecordings,
            AggregateKind::TopArtists,
            AggregateKind::TopReleases,
        ]
    }

    fn source_kind(&self) -> SourceKind {
        SourceKind::Analytical
    }

    async fn fetch(&self, request: &AggregateRequest) -> Result<SourceValue> {
        let query = self.builder.build(request)?;
        let raw_rows = self
            .engine
            .run_query(&query)
            .await
            .map_err(|e| backing_error(SourceKind::Analytical, "Aggregate query failed", e))?;

        let rows = raw_rows
            .iter()
            .map(|row| map_row(row, query.columns))
            .collect::<Result<Vec<_>>>()?;

        Ok(SourceValue::Rows(AggregateResult::from_rows(
            rows,
            self.builder.entity_limit(),
        )))
    }
}
