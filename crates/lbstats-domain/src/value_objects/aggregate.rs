//! Aggregate requests and results

use crate::constants::{
    ALL_TIME_TOKEN, CACHE_KEY_SEPARATOR, IMPORTER_QUEUE_METRIC, LISTEN_COUNT_FIELD,
    SUBJECT_DIGEST_HEX_LEN,
};
use crate::error::{Error, Result};
use crate::value_objects::window::TimeWindow;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Kind of derived metric a caller can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateKind {
    /// Most listened recordings of a user
    TopRecordings,
    /// Most listened artists of a user
    TopArtists,
    /// Most listened releases of a user
    TopReleases,
    /// Number of registered users
    UserCount,
    /// Message count of a named broker queue
    QueueDepth,
    /// Total number of listens
    ListenCount,
    /// Length of the importer work list
    ImporterQueueSize,
}

impl AggregateKind {
    /// Every kind, in declaration order
    pub const ALL: [AggregateKind; 7] = [
        Self::TopRecordings,
        Self::TopArtists,
        Self::TopReleases,
        Self::UserCount,
        Self::QueueDepth,
        Self::ListenCount,
        Self::ImporterQueueSize,
    ];

    /// Stable snake_case name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopRecordings => "top_recordings",
            Self::TopArtists => "top_artists",
            Self::TopReleases => "top_releases",
            Self::UserCount => "user_count",
            Self::QueueDepth => "queue_depth",
            Self::ListenCount => "listen_count",
            Self::ImporterQueueSize => "importer_queue_size",
        }
    }

    /// True for the grouped top-N kinds served by the analytical engine
    pub fn is_top_n(self) -> bool {
        matches!(
            self,
            Self::TopRecordings | Self::TopArtists | Self::TopReleases
        )
    }

    /// True if a request of this kind must carry a subject identifier
    pub fn requires_subject(self) -> bool {
        self.is_top_n() || self == Self::QueueDepth
    }

    /// True if failures degrade to the unknown-depth sentinel instead of erroring
    pub fn uses_queue_sentinel(self) -> bool {
        matches!(self, Self::QueueDepth | Self::ImporterQueueSize)
    }
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request for one aggregate value
///
/// Immutable and built per call. The subject is the user name for top-N
/// kinds and the queue name for [`AggregateKind::QueueDepth`]; other kinds
/// ignore it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AggregateRequest {
    kind: AggregateKind,
    subject: String,
    window: Option<TimeWindow>,
}

impl AggregateRequest {
    /// Create a request; call [`validate`](Self::validate) before fetching
    pub fn new<S: Into<String>>(kind: AggregateKind, subject: S, window: Option<TimeWindow>) -> Self {
        Self {
            kind,
            subject: subject.into(),
            window,
        }
    }

    /// Top-N request for a user over an optional window
    pub fn top<S: Into<String>>(kind: AggregateKind, subject: S, window: Option<TimeWindow>) -> Self {
        Self::new(kind, subject, window)
    }

    /// Registered user count
    pub fn user_count() -> Self {
        Self::new(AggregateKind::UserCount, String::new(), None)
    }

    /// Total listen count
    pub fn listen_count() -> Self {
        Self::new(AggregateKind::ListenCount, String::new(), None)
    }

    /// Importer work list length
    pub fn importer_queue_size() -> Self {
        Self::new(AggregateKind::ImporterQueueSize, String::new(), None)
    }

    /// Depth of a named broker queue
    pub fn queue_depth<S: Into<String>>(queue: S) -> Self {
        Self::new(AggregateKind::QueueDepth, queue, None)
    }

    /// Aggregate kind
    pub fn kind(&self) -> AggregateKind {
        self.kind
    }

    /// Subject identifier (may be empty for subject-less kinds)
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Optional relative window; `None` means all time
    pub fn window(&self) -> Option<TimeWindow> {
        self.window
    }

    /// Reject malformed requests before any cache or source access
    pub fn validate(&self) -> Result<()> {
        if self.kind.requires_subject() && self.subject.trim().is_empty() {
            return Err(Error::validation(format!(
                "A subject identifier is required for {}",
                self.kind
            )));
        }
        if self.window.is_some() && !self.kind.is_top_n() {
            return Err(Error::validation(format!(
                "{} does not accept a time window",
                self.kind
            )));
        }
        Ok(())
    }

    /// Metric part of the cache key
    ///
    /// Top-N subjects are arbitrary user input, so they are folded into a
    /// fixed-length hex digest to keep keys ASCII and unambiguous.
    pub fn metric_name(&self) -> String {
        match self.kind {
            AggregateKind::UserCount | AggregateKind::ListenCount => self.kind.as_str().to_string(),
            AggregateKind::ImporterQueueSize => IMPORTER_QUEUE_METRIC.to_string(),
            AggregateKind::QueueDepth => format!("{}_queue_size", queue_token(&self.subject)),
            AggregateKind::TopRecordings | AggregateKind::TopArtists | AggregateKind::TopReleases => {
                let window = self
                    .window
                    .map_or_else(|| ALL_TIME_TOKEN.to_string(), |w| w.key_token());
                format!(
                    "{}{sep}{}{sep}{}",
                    self.kind,
                    window,
                    subject_digest(&self.subject),
                    sep = CACHE_KEY_SEPARATOR
                )
            }
        }
    }

    /// Full cache key `<namespace>.<metric-name>`
    pub fn cache_key(&self, namespace: &str) -> String {
        format!("{namespace}{CACHE_KEY_SEPARATOR}{}", self.metric_name())
    }
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Queue name as a single key token
///
/// Names within `[A-Za-z0-9_-]` are used as-is. Any other name is folded to
/// that charset and suffixed with its digest, joined by the key separator,
/// which a plain name can never contain.
fn queue_token(raw: &str) -> String {
    if raw.chars().all(is_token_char) {
        return raw.to_string();
    }
    let folded: String = raw
        .chars()
        .map(|c| if is_token_char(c) { c } else { '_' })
        .collect();
    format!("{folded}{CACHE_KEY_SEPARATOR}{}", subject_digest(raw))
}

fn subject_digest(subject: &str) -> String {
    let digest = Sha256::digest(subject.as_bytes());
    let mut hex = hex::encode(digest);
    hex.truncate(SUBJECT_DIGEST_HEX_LEN);
    hex
}

/// A single field of a top-N row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    /// Free text (names, concatenated MBID lists)
    Text(String),
    /// Identifier
    Uuid(Uuid),
    /// Occurrence count
    Count(i64),
    /// Missing value
    Null,
}

impl From<&FieldValue> for serde_json::Value {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Text(text) => serde_json::Value::String(text.clone()),
            FieldValue::Uuid(id) => serde_json::Value::String(id.to_string()),
            FieldValue::Count(count) => serde_json::Value::from(*count),
            FieldValue::Null => serde_json::Value::Null,
        }
    }
}

/// One row of a top-N aggregate, keyed by column name
pub type AggregateRow = BTreeMap<String, FieldValue>;

/// Ordered top-N rows
///
/// Rows are sorted by `listen_count` descending and never exceed the entity
/// limit they were built with. Equal counts keep the order the source
/// returned them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    rows: Vec<AggregateRow>,
}

impl AggregateResult {
    /// Sort `rows` by count and cap them at `entity_limit`
    pub fn from_rows(mut rows: Vec<AggregateRow>, entity_limit: usize) -> Self {
        rows.sort_by_key(|row| std::cmp::Reverse(listen_count(row)));
        rows.truncate(entity_limit);
        Self { rows }
    }

    /// Rows in count order
    pub fn rows(&self) -> &[AggregateRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if there are no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consume into the row vector
    pub fn into_rows(self) -> Vec<AggregateRow> {
        self.rows
    }

    /// Rows as plain JSON objects
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.rows
                .iter()
                .map(|row| {
                    serde_json::Value::Object(
                        row.iter()
                            .map(|(name, value)| (name.clone(), value.into()))
                            .collect(),
                    )
                })
                .collect(),
        )
    }
}

/// Count of a row, treating a missing or non-count field as zero
pub fn listen_count(row: &AggregateRow) -> i64 {
    match row.get(LISTEN_COUNT_FIELD) {
        Some(FieldValue::Count(count)) => *count,
        _ => 0,
    }
}

/// Integer aggregate and the key it is cached under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarAggregate {
    /// Cache key of the metric
    pub key: String,
    /// Count, or the unknown sentinel for an unprobeable queue
    pub value: i64,
}

/// Value produced for a resolved request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateValue {
    /// Scalar count
    Count(i64),
    /// Top-N rows
    Rows(AggregateResult),
}

impl AggregateValue {
    /// The count, if this is a scalar
    pub fn as_count(&self) -> Option<i64> {
        match self {
            Self::Count(count) => Some(*count),
            Self::Rows(_) => None,
        }
    }

    /// The rows, if this is a top-N result
    pub fn as_rows(&self) -> Option<&AggregateResult> {
        match self {
            Self::Rows(rows) => Some(rows),
            Self::Count(_) => None,
        }
    }

    /// Encode for the cache store; scalars are stored as their decimal string
    pub fn encode(&self) -> Result<String> {
        match self {
            Self::Count(count) => Ok(count.to_string()),
            Self::Rows(rows) => Ok(serde_json::to_string(rows)?),
        }
    }

    /// Decode a cached value for a request of `kind`
    pub fn decode(kind: AggregateKind, raw: &str) -> Result<Self> {
        if kind.is_top_n() {
            Ok(Self::Rows(serde_json::from_str(raw)?))
        } else {
            raw.trim()
                .parse::<i64>()
                .map(Self::Count)
                .map_err(|_| Error::internal(format!("Cached {kind} is not an integer: {raw:?}")))
        }
    }
}
