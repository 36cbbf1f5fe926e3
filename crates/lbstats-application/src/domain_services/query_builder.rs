//! Aggregate Query Builder
//!
//! Produces top-N grouped-count queries for the analytical engine. Each
//! aggregate kind selects a fixed template; the only values that reach the
//! query text are trusted ones:
//!
//! - the `dataset.table` pair, validated at construction from configuration
//! - the entity limit, an integer from configuration
//! - the [`TimeWindow`] literal, which can only be built by parsing
//!   `<amount> <UNIT>`
//!
//! The subject identifier is untrusted and is always bound as the `@subject_id`
//! STRING parameter.

use lbstats_domain::constants::{LISTEN_COUNT_FIELD, SUBJECT_PARAMETER};
use lbstats_domain::error::{Error, Result};
use lbstats_domain::value_objects::{
    AggregateKind, AggregateQuery, AggregateRequest, ColumnSpec, QueryParameter, TimeWindow,
};

/// Fixed shape of one top-N query
struct QueryTemplate {
    /// Returned columns in select order; the last one is the count
    columns: &'static [ColumnSpec],
    /// Composite grouping key
    group_by: &'static [&'static str],
    /// Message identifier counted per group
    counted: &'static str,
}

const RECORDING_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::text("artist_name"),
    ColumnSpec::uuid("artist_msid"),
    ColumnSpec::text("artist_mbids"),
    ColumnSpec::uuid("recording_msid"),
    ColumnSpec::uuid("recording_mbid"),
    ColumnSpec::text("track_name"),
    ColumnSpec::count(LISTEN_COUNT_FIELD),
];

const ARTIST_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::text("artist_name"),
    ColumnSpec::uuid("artist_msid"),
    ColumnSpec::text("artist_mbids"),
    ColumnSpec::count(LISTEN_COUNT_FIELD),
];

const RELEASE_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::text("artist_name"),
    ColumnSpec::uuid("artist_msid"),
    ColumnSpec::text("artist_mbids"),
    ColumnSpec::text("release_name"),
    ColumnSpec::uuid("release_msid"),
    ColumnSpec::uuid("release_mbid"),
    ColumnSpec::count(LISTEN_COUNT_FIELD),
];

// artist_mbids is a comma-joined string and is grouped on as-is.
const RECORDINGS: QueryTemplate = QueryTemplate {
    columns: RECORDING_COLUMNS,
    group_by: &[
        "recording_msid",
        "recording_mbid",
        "track_name",
        "artist_name",
        "artist_msid",
        "artist_mbids",
    ],
    counted: "recording_msid",
};

const ARTISTS: QueryTemplate = QueryTemplate {
    columns: ARTIST_COLUMNS,
    group_by: &["artist_msid", "artist_name", "artist_mbids"],
    counted: "artist_msid",
};

const RELEASES: QueryTemplate = QueryTemplate {
    columns: RELEASE_COLUMNS,
    group_by: &[
        "artist_msid",
        "artist_mbids",
        "artist_name",
        "release_name",
        "release_msid",
        "release_mbid",
    ],
    counted: "release_msid",
};

fn template_for(kind: AggregateKind) -> Option<&'static QueryTemplate> {
    match kind {
        AggregateKind::TopRecordings => Some(&RECORDINGS),
        AggregateKind::TopArtists => Some(&ARTISTS),
        AggregateKind::TopReleases => Some(&RELEASES),
        _ => None,
    }
}

/// Time filter for a window; empty for all time
fn time_filter_clause(window: Option<TimeWindow>) -> String {
    window.map_or_else(String::new, |w| {
        format!(
            "\n   AND listened_at >= TIMESTAMP_SUB(CURRENT_TIMESTAMP(), INTERVAL {})",
            w.interval_literal()
        )
    })
}

fn is_identifier(raw: &str) -> bool {
    !raw.is_empty()
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Builds parameterized top-N queries against one listens table
#[derive(Debug, Clone)]
pub struct AggregateQueryBuilder {
    table: String,
    entity_limit: usize,
}

impl AggregateQueryBuilder {
    /// Create a builder for `dataset_id.table_id`, capping results at `entity_limit`
    pub fn new(dataset_id: &str, table_id: &str, entity_limit: usize) -> Result<Self> {
        if !is_identifier(dataset_id) || !is_identifier(table_id) {
            return Err(Error::configuration(format!(
                "Invalid analytical table '{dataset_id}.{table_id}'"
            )));
        }
        if entity_limit == 0 {
            return Err(Error::configuration("Entity limit must be at least 1"));
        }
        Ok(Self {
            table: format!("{dataset_id}.{table_id}"),
            entity_limit,
        })
    }

    /// Configured row cap
    pub fn entity_limit(&self) -> usize {
        self.entity_limit
    }

    /// Build the query for a top-N request
    pub fn build(&self, request: &AggregateRequest) -> Result<AggregateQuery> {
        let kind = request.kind();
        let template = template_for(kind).ok_or_else(|| {
            Error::validation(format!("{kind} is not an analytical aggregate"))
        })?;

        let subject = request.subject();
        if subject.trim().is_empty() {
            return Err(Error::validation(format!(
                "A subject identifier is required for {kind}"
            )));
        }

        let select = template
            .columns
            .iter()
            .map(|column| {
                if column.name == LISTEN_COUNT_FIELD {
                    format!("COUNT({}) AS {LISTEN_COUNT_FIELD}", template.counted)
                } else {
                    column.name.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n     , ");

        let sql = format!(
            "SELECT {select}\n  FROM `{table}`\n WHERE user_name = @{SUBJECT_PARAMETER}{filter}\n GROUP BY {group_by}\n ORDER BY {LISTEN_COUNT_FIELD} DESC\n LIMIT {limit}",
            table = self.table,
            filter = time_filter_clause(request.window()),
            group_by = template.group_by.join(", "),
            limit = self.entity_limit,
        );

        Ok(AggregateQuery {
            kind,
            sql,
            parameters: vec![QueryParameter::string(SUBJECT_PARAMETER, subject)],
            columns: template.columns,
        })
    }
}
