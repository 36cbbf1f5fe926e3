//! Parameterized analytical queries

use crate::value_objects::aggregate::AggregateKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Engine type of a bound parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParameterType {
    /// UTF-8 string
    String,
    /// 64-bit integer
    Int64,
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "STRING",
            Self::Int64 => "INT64",
        })
    }
}

/// Named parameter bound by the engine, never spliced into the query text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParameter {
    /// Parameter name without the `@` sigil
    pub name: String,
    /// Engine type
    pub parameter_type: ParameterType,
    /// Value in its string form
    pub value: String,
}

impl QueryParameter {
    /// String parameter
    pub fn string<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self {
            name: name.into(),
            parameter_type: ParameterType::String,
            value: value.into(),
        }
    }
}

/// How a returned column is mapped into a row field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Free text
    Text,
    /// Identifier; falls back to text if the engine returns something else
    Uuid,
    /// Integer count
    Count,
}

/// Returned column of a query template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column name as returned by the engine
    pub name: &'static str,
    /// Field mapping
    pub column_type: ColumnType,
}

impl ColumnSpec {
    /// Text column
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            column_type: ColumnType::Text,
        }
    }

    /// UUID column
    pub const fn uuid(name: &'static str) -> Self {
        Self {
            name,
            column_type: ColumnType::Uuid,
        }
    }

    /// Count column
    pub const fn count(name: &'static str) -> Self {
        Self {
            name,
            column_type: ColumnType::Count,
        }
    }
}

/// Query text plus typed parameters, ready to hand to an analytical engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateQuery {
    /// Aggregate the query computes
    pub kind: AggregateKind,
    /// Query text with `@name` placeholders
    pub sql: String,
    /// Bound parameters
    pub parameters: Vec<QueryParameter>,
    /// Columns the query returns, in select order
    pub columns: &'static [ColumnSpec],
}

impl AggregateQuery {
    /// Look up a bound parameter by name
    pub fn parameter(&self, name: &str) -> Option<&QueryParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}
