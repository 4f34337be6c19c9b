//! Trace service — listing queries, option lists, and row mutations.
//!
//! DESIGN
//! ======
//! The listing SQL is assembled dynamically from the domain crate's filter
//! predicates. Everything user-controlled is either bound as a parameter or
//! resolved through the column registry safe-list, never spliced into the
//! SQL text: an unknown sort column silently falls back to `timestamp desc`
//! and an unknown filter column is skipped.
//!
//! ERROR HANDLING
//! ==============
//! Mutations report `NotFound` when no row matched so routes can answer 404
//! instead of a silent no-op 200.

#[cfg(test)]
#[path = "trace_test.rs"]
mod trace_test;

use std::collections::HashMap;

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use time::OffsetDateTime;
use uuid::Uuid;

use traces::filter::{FilterOperator, FilterPredicate, FilterValue};
use traces::options::TimeWindow;
use traces::order::{OrderBy, SortDirection};
use traces::record::{
    FilterOptionsResponse, RecordUsage, TraceDetail, TracePage, TraceRecord, TraceScore,
};
use traces::{TraceLevel, TraceQuery, columns};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("trace not found: {0}")]
    NotFound(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

// =============================================================================
// LISTING
// =============================================================================

const LISTING_COLUMNS: &str = "t.id, t.project_id, t.timestamp, t.name, t.user_id, t.level, \
     t.observation_count, t.latency, t.release, t.version, t.session_id, t.bookmarked, t.tags, \
     t.prompt_tokens, t.completion_tokens, t.total_tokens, t.input_cost, t.output_cost, \
     t.total_cost";

/// Fetch one page of the listing plus the filtered window's total count.
///
/// # Errors
///
/// Returns a database error if any of the page, count, or score queries fail.
pub async fn list_traces(pool: &PgPool, query: &TraceQuery) -> Result<TracePage, TraceError> {
    let mut qb = QueryBuilder::new(format!("SELECT {LISTING_COLUMNS} FROM traces t"));
    push_where(&mut qb, query);
    qb.push(" ORDER BY ");
    qb.push(order_clause(query.order_by.as_ref()));
    qb.push(" LIMIT ");
    qb.push_bind(as_i64(query.page.page_size));
    qb.push(" OFFSET ");
    qb.push_bind(as_i64(query.page.offset()));

    let rows = qb.build().fetch_all(pool).await?;
    let mut records = rows
        .iter()
        .map(record_from_row)
        .collect::<Result<Vec<_>, sqlx::Error>>()?;

    let mut count_qb = QueryBuilder::new("SELECT COUNT(*) AS total FROM traces t");
    push_where(&mut count_qb, query);
    let total: i64 = count_qb.build().fetch_one(pool).await?.try_get("total")?;

    attach_scores(pool, &mut records).await?;

    Ok(TracePage { traces: records, total_count: total.max(0).unsigned_abs() })
}

/// Full per-id payload including the large input/output/metadata fields.
///
/// # Errors
///
/// Returns [`TraceError::NotFound`] when no trace matches in this project.
pub async fn get_trace(
    pool: &PgPool,
    project_id: &str,
    trace_id: Uuid,
) -> Result<TraceDetail, TraceError> {
    let sql = format!(
        "SELECT {LISTING_COLUMNS}, t.input, t.output, t.metadata \
         FROM traces t WHERE t.project_id = $1 AND t.id = $2"
    );
    let row = sqlx::query(&sql)
        .bind(project_id)
        .bind(trace_id)
        .fetch_optional(pool)
        .await?
        .ok_or(TraceError::NotFound(trace_id))?;

    let mut records = vec![record_from_row(&row)?];
    attach_scores(pool, &mut records).await?;
    let record = records.remove(0);

    Ok(TraceDetail {
        record,
        input: row.try_get("input")?,
        output: row.try_get("output")?,
        metadata: row.try_get("metadata")?,
    })
}

/// Option lists for filterable columns, restricted to `window` when the
/// active filter carries timestamp bounds.
///
/// # Errors
///
/// Returns a database error if any of the option queries fail.
pub async fn filter_options(
    pool: &PgPool,
    project_id: &str,
    window: Option<TimeWindow>,
) -> Result<FilterOptionsResponse, TraceError> {
    let names =
        distinct_values(pool, "t.name", "t.name IS NOT NULL", project_id, window).await?;
    let tags =
        distinct_unnested_tags(pool, project_id, window).await?;
    let releases =
        distinct_values(pool, "t.release", "t.release IS NOT NULL", project_id, window).await?;

    Ok(FilterOptionsResponse { names, tags, releases })
}

// =============================================================================
// MUTATIONS
// =============================================================================

/// Bulk delete. Returns the number of rows removed.
///
/// # Errors
///
/// Returns a database error if the delete fails.
pub async fn delete_traces(
    pool: &PgPool,
    project_id: &str,
    trace_ids: &[Uuid],
) -> Result<u64, TraceError> {
    if trace_ids.is_empty() {
        return Ok(0);
    }
    let result = sqlx::query("DELETE FROM traces WHERE project_id = $1 AND id = ANY($2)")
        .bind(project_id)
        .bind(trace_ids)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Set the bookmark flag on one trace.
///
/// # Errors
///
/// Returns [`TraceError::NotFound`] when the trace does not exist.
pub async fn set_bookmark(
    pool: &PgPool,
    project_id: &str,
    trace_id: Uuid,
    bookmarked: bool,
) -> Result<(), TraceError> {
    let result =
        sqlx::query("UPDATE traces SET bookmarked = $3 WHERE project_id = $1 AND id = $2")
            .bind(project_id)
            .bind(trace_id)
            .bind(bookmarked)
            .execute(pool)
            .await?;
    if result.rows_affected() == 0 {
        return Err(TraceError::NotFound(trace_id));
    }
    Ok(())
}

/// Replace the tag set of one trace.
///
/// # Errors
///
/// Returns [`TraceError::NotFound`] when the trace does not exist.
pub async fn update_tags(
    pool: &PgPool,
    project_id: &str,
    trace_id: Uuid,
    tags: &[String],
) -> Result<(), TraceError> {
    let result = sqlx::query("UPDATE traces SET tags = $3 WHERE project_id = $1 AND id = $2")
        .bind(project_id)
        .bind(trace_id)
        .bind(tags)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(TraceError::NotFound(trace_id));
    }
    Ok(())
}

// =============================================================================
// SQL ASSEMBLY
// =============================================================================

/// Push the WHERE clause shared by the page and count queries.
fn push_where(qb: &mut QueryBuilder<'_, Postgres>, query: &TraceQuery) {
    qb.push(" WHERE t.project_id = ");
    qb.push_bind(query.project_id.clone());

    for pred in &query.filters {
        push_filter(qb, pred);
    }

    if let Some(search) = &query.search {
        let pattern = like_pattern(search);
        qb.push(" AND (t.id::text ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR t.name ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR t.user_id ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }
}

/// Translate one predicate into SQL. Predicates that do not map onto a known
/// column/operator/value combination are skipped — the codec upstream already
/// drops malformed input, so anything left over here is a version-skew
/// artifact, not an attack surface (all values are bound).
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, pred: &FilterPredicate) {
    match (pred.column.as_str(), pred.op, &pred.value) {
        ("timestamp", FilterOperator::Gte, FilterValue::Timestamp(ms)) => {
            if let Some(ts) = ms_to_timestamp(*ms) {
                qb.push(" AND t.timestamp >= ");
                qb.push_bind(ts);
            }
        }
        ("timestamp", FilterOperator::Lte, FilterValue::Timestamp(ms)) => {
            if let Some(ts) = ms_to_timestamp(*ms) {
                qb.push(" AND t.timestamp <= ");
                qb.push_bind(ts);
            }
        }
        ("level", FilterOperator::Eq, FilterValue::Level(level)) => {
            qb.push(" AND t.level = ");
            qb.push_bind(level.as_str());
        }
        ("level", FilterOperator::Gte, FilterValue::Level(level)) => {
            let allowed: Vec<String> = TraceLevel::at_or_above(*level)
                .into_iter()
                .map(|l| l.as_str().to_owned())
                .collect();
            qb.push(" AND t.level = ANY(");
            qb.push_bind(allowed);
            qb.push(")");
        }
        ("tags", FilterOperator::AnyOf, FilterValue::List(tags)) => {
            qb.push(" AND t.tags && ");
            qb.push_bind(tags.clone());
        }
        ("tags", FilterOperator::AllOf, FilterValue::List(tags)) => {
            qb.push(" AND t.tags @> ");
            qb.push_bind(tags.clone());
        }
        ("bookmarked", FilterOperator::Eq, FilterValue::Flag(flag)) => {
            qb.push(" AND t.bookmarked = ");
            qb.push_bind(*flag);
        }
        ("latency", op, FilterValue::Number(n)) => {
            if let Some(cmp) = numeric_comparator(op) {
                qb.push(format!(" AND t.latency {cmp} "));
                qb.push_bind(*n);
            }
        }
        ("total_cost", op, FilterValue::Number(n)) => {
            if let Some(cmp) = numeric_comparator(op) {
                qb.push(format!(" AND t.total_cost::float8 {cmp} "));
                qb.push_bind(*n);
            }
        }
        (column @ ("name" | "user_id" | "session_id" | "release" | "version"), op, FilterValue::Text(text)) => {
            match op {
                FilterOperator::Eq => {
                    qb.push(format!(" AND t.{column} = "));
                    qb.push_bind(text.clone());
                }
                FilterOperator::Neq => {
                    qb.push(format!(" AND t.{column} <> "));
                    qb.push_bind(text.clone());
                }
                FilterOperator::Contains => {
                    qb.push(format!(" AND t.{column} ILIKE "));
                    qb.push_bind(like_pattern(text));
                }
                _ => {}
            }
        }
        _ => {}
    }
}

fn numeric_comparator(op: FilterOperator) -> Option<&'static str> {
    match op {
        FilterOperator::Eq => Some("="),
        FilterOperator::Gt => Some(">"),
        FilterOperator::Gte => Some(">="),
        FilterOperator::Lt => Some("<"),
        FilterOperator::Lte => Some("<="),
        _ => None,
    }
}

/// ORDER BY expression resolved through the column registry safe-list.
/// Unregistered or unsortable columns fall back to `timestamp desc`.
fn order_clause(order_by: Option<&OrderBy>) -> String {
    let (column, direction) = order_by
        .filter(|o| columns::sortable(&o.column))
        .map_or(("timestamp", SortDirection::Desc), |o| (o.column.as_str(), o.direction));

    let expr = match column {
        "name" => "t.name",
        "user_id" => "t.user_id",
        "session_id" => "t.session_id",
        "latency" => "t.latency",
        // Severity order, not alphabetical.
        "level" => {
            "CASE t.level WHEN 'DEBUG' THEN 0 WHEN 'DEFAULT' THEN 1 WHEN 'WARNING' THEN 2 ELSE 3 END"
        }
        "observation_count" => "t.observation_count",
        "bookmarked" => "t.bookmarked",
        "prompt_tokens" => "t.prompt_tokens",
        "completion_tokens" => "t.completion_tokens",
        "total_tokens" => "t.total_tokens",
        "input_cost" => "t.input_cost",
        "output_cost" => "t.output_cost",
        "total_cost" => "t.total_cost",
        "release" => "t.release",
        "version" => "t.version",
        "id" => "t.id",
        _ => "t.timestamp",
    };
    let dir = match direction {
        SortDirection::Asc => "ASC NULLS LAST",
        SortDirection::Desc => "DESC NULLS LAST",
    };
    format!("{expr} {dir}")
}

/// ILIKE pattern with the user's wildcards escaped.
fn like_pattern(term: &str) -> String {
    let escaped = term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
    format!("%{escaped}%")
}

// =============================================================================
// ROW MAPPING
// =============================================================================

fn record_from_row(row: &PgRow) -> Result<TraceRecord, sqlx::Error> {
    let id: Uuid = row.try_get("id")?;
    let timestamp: OffsetDateTime = row.try_get("timestamp")?;
    let observation_count: i32 = row.try_get("observation_count")?;

    Ok(TraceRecord {
        id: id.to_string(),
        project_id: row.try_get("project_id")?,
        timestamp: timestamp_to_ms(timestamp),
        name: row.try_get("name")?,
        user_id: row.try_get("user_id")?,
        level: row.try_get("level")?,
        observation_count: i64::from(observation_count),
        latency: row.try_get("latency")?,
        release: row.try_get("release")?,
        version: row.try_get("version")?,
        session_id: row.try_get("session_id")?,
        bookmarked: row.try_get("bookmarked")?,
        tags: row.try_get("tags")?,
        scores: Vec::new(),
        usage: RecordUsage {
            prompt_tokens: row.try_get("prompt_tokens")?,
            completion_tokens: row.try_get("completion_tokens")?,
            total_tokens: row.try_get("total_tokens")?,
        },
        calculated_input_cost: row.try_get("input_cost")?,
        calculated_output_cost: row.try_get("output_cost")?,
        calculated_total_cost: row.try_get("total_cost")?,
    })
}

/// Fetch and attach scores for the page's traces in one query.
async fn attach_scores(pool: &PgPool, records: &mut [TraceRecord]) -> Result<(), TraceError> {
    let ids: Vec<Uuid> =
        records.iter().filter_map(|r| Uuid::parse_str(&r.id).ok()).collect();
    if ids.is_empty() {
        return Ok(());
    }

    let rows = sqlx::query(
        "SELECT trace_id, name, value, source FROM trace_scores WHERE trace_id = ANY($1)",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let mut by_trace: HashMap<String, Vec<TraceScore>> = HashMap::new();
    for row in rows {
        let trace_id: Uuid = row.try_get("trace_id")?;
        by_trace.entry(trace_id.to_string()).or_default().push(TraceScore {
            name: row.try_get("name")?,
            value: row.try_get("value")?,
            source: row.try_get("source")?,
        });
    }

    for record in records {
        if let Some(scores) = by_trace.remove(&record.id) {
            record.scores = scores;
        }
    }
    Ok(())
}

// =============================================================================
// HELPERS
// =============================================================================

async fn distinct_values(
    pool: &PgPool,
    expr: &str,
    guard: &str,
    project_id: &str,
    window: Option<TimeWindow>,
) -> Result<Vec<String>, TraceError> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT DISTINCT {expr} AS value FROM traces t WHERE {guard} AND t.project_id = "
    ));
    qb.push_bind(project_id.to_owned());
    push_window(&mut qb, window);
    qb.push(" ORDER BY value LIMIT 1000");

    let rows = qb.build().fetch_all(pool).await?;
    rows.iter()
        .map(|row| row.try_get::<String, _>("value"))
        .collect::<Result<Vec<_>, _>>()
        .map_err(TraceError::from)
}

async fn distinct_unnested_tags(
    pool: &PgPool,
    project_id: &str,
    window: Option<TimeWindow>,
) -> Result<Vec<String>, TraceError> {
    let mut qb = QueryBuilder::new(
        "SELECT DISTINCT unnest(t.tags) AS value FROM traces t WHERE t.project_id = ",
    );
    qb.push_bind(project_id.to_owned());
    push_window(&mut qb, window);
    qb.push(" ORDER BY value LIMIT 1000");

    let rows = qb.build().fetch_all(pool).await?;
    rows.iter()
        .map(|row| row.try_get::<String, _>("value"))
        .collect::<Result<Vec<_>, _>>()
        .map_err(TraceError::from)
}

fn push_window(qb: &mut QueryBuilder<'_, Postgres>, window: Option<TimeWindow>) {
    let Some(window) = window else {
        return;
    };
    if let Some(ts) = window.from.and_then(ms_to_timestamp) {
        qb.push(" AND t.timestamp >= ");
        qb.push_bind(ts);
    }
    if let Some(ts) = window.to.and_then(ms_to_timestamp) {
        qb.push(" AND t.timestamp <= ");
        qb.push_bind(ts);
    }
}

fn ms_to_timestamp(ms: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000).ok()
}

fn timestamp_to_ms(ts: OffsetDateTime) -> i64 {
    i64::try_from(ts.unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX)
}

fn as_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
