//! TraceDeck API CLI — query and mutate trace listings from the terminal.
//!
//! Speaks the same HTTP surface as the dashboard, using the domain crate's
//! filter/order grammar, so a `--filter` here is exactly the `filter=` query
//! parameter of a dashboard URL.

use clap::{Parser, Subcommand};
use uuid::Uuid;

use traces::params::parse_predicates;
use traces::record::{FilterOptionsResponse, TraceDetail, TracePage, TraceRecord};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid filter `{0}`: no predicate parsed (grammar: column.op.value~...)")]
    InvalidFilter(String),
    #[error("invalid order `{0}` (grammar: column.asc | column.desc)")]
    InvalidOrder(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status} for {url}")]
    Api { status: u16, url: String },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "tracedeck", about = "TraceDeck trace API CLI")]
struct Cli {
    #[arg(long, env = "TRACEDECK_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "TRACEDECK_ADMIN_TOKEN")]
    admin_token: Option<String>,

    #[arg(long, env = "TRACEDECK_PROJECT", default_value = "demo")]
    project: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List traces as an aligned table (or raw JSON).
    List {
        /// Filter predicates, `column.op.value` joined by `~`.
        #[arg(long)]
        filter: Option<String>,
        /// Free-text search over id, name, and user.
        #[arg(long)]
        search: Option<String>,
        /// Sort spec, e.g. `latency.desc`.
        #[arg(long)]
        order: Option<String>,
        #[arg(long, default_value_t = 0)]
        page: usize,
        #[arg(long, default_value_t = 50)]
        limit: usize,
        /// Print the raw JSON page instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Fetch one trace in full (input/output/metadata included).
    Get { trace_id: Uuid },
    /// Bulk-delete traces (requires the admin token on gated instances).
    Delete {
        #[arg(required = true)]
        trace_ids: Vec<Uuid>,
    },
    /// Replace a trace's tag set.
    Tag {
        trace_id: Uuid,
        #[arg(long, value_delimiter = ',', required = true)]
        tags: Vec<String>,
    },
    /// Show the filter option lists (names, tags, releases).
    Options {
        /// Optional filter whose timestamp bounds window the option lists.
        #[arg(long)]
        filter: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Command::List { ref filter, ref search, ref order, page, limit, json } => {
            let filter = validate_filter(filter.as_deref())?;
            let order = validate_order(order.as_deref())?;

            let url = format!("{}/api/projects/{}/traces", cli.base_url, cli.project);
            let mut query: Vec<(&str, String)> =
                vec![("page", page.to_string()), ("limit", limit.to_string())];
            if let Some(filter) = filter {
                query.push(("filter", filter));
            }
            if let Some(search) = search {
                query.push(("search", search.clone()));
            }
            if let Some(order) = order {
                query.push(("order", order));
            }

            let response = client.get(&url).query(&query).send().await?;
            if !response.status().is_success() {
                return Err(CliError::Api { status: response.status().as_u16(), url });
            }
            let page: TracePage = response.json().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                print!("{}", render_listing_table(&page));
            }
        }
        Command::Get { trace_id } => {
            let url =
                format!("{}/api/projects/{}/traces/{}", cli.base_url, cli.project, trace_id);
            let response = client.get(&url).send().await?;
            if !response.status().is_success() {
                return Err(CliError::Api { status: response.status().as_u16(), url });
            }
            let detail: TraceDetail = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
        Command::Delete { ref trace_ids } => {
            let url = format!("{}/api/projects/{}/traces", cli.base_url, cli.project);
            let mut request =
                client.delete(&url).json(&serde_json::json!({ "trace_ids": trace_ids }));
            if let Some(token) = &cli.admin_token {
                request = request.header("x-admin-token", token);
            }
            let response = request.send().await?;
            if !response.status().is_success() {
                return Err(CliError::Api { status: response.status().as_u16(), url });
            }
            let body: serde_json::Value = response.json().await?;
            println!("deleted {}", body.get("deleted").and_then(serde_json::Value::as_u64).unwrap_or(0));
        }
        Command::Tag { trace_id, ref tags } => {
            let url = format!(
                "{}/api/projects/{}/traces/{}/tags",
                cli.base_url, cli.project, trace_id
            );
            let response =
                client.put(&url).json(&serde_json::json!({ "tags": tags })).send().await?;
            if !response.status().is_success() {
                return Err(CliError::Api { status: response.status().as_u16(), url });
            }
            println!("tagged {trace_id}");
        }
        Command::Options { ref filter } => {
            let filter = validate_filter(filter.as_deref())?;
            let url = format!(
                "{}/api/projects/{}/traces/filter-options",
                cli.base_url, cli.project
            );
            let mut query: Vec<(&str, String)> = Vec::new();
            if let Some(filter) = filter {
                query.push(("filter", filter));
            }
            let response = client.get(&url).query(&query).send().await?;
            if !response.status().is_success() {
                return Err(CliError::Api { status: response.status().as_u16(), url });
            }
            let options: FilterOptionsResponse = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&options)?);
        }
    }

    Ok(())
}

/// Reject filters that parse to nothing: silently sending an empty filter
/// when the user typed one would return the unfiltered listing.
fn validate_filter(raw: Option<&str>) -> Result<Option<String>, CliError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    if parse_predicates(raw).is_empty() {
        return Err(CliError::InvalidFilter(raw.to_owned()));
    }
    Ok(Some(raw.to_owned()))
}

fn validate_order(raw: Option<&str>) -> Result<Option<String>, CliError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    if traces::order::OrderBy::parse(raw).is_none() {
        return Err(CliError::InvalidOrder(raw.to_owned()));
    }
    Ok(Some(raw.to_owned()))
}

// =============================================================================
// TABLE RENDERING
// =============================================================================

const LISTING_HEADERS: [&str; 6] = ["TIMESTAMP", "LEVEL", "NAME", "LATENCY", "TOKENS", "ID"];

fn listing_row(record: &TraceRecord) -> [String; 6] {
    [
        record.timestamp.to_string(),
        record.level.clone(),
        record.name.clone(),
        record.latency.map(|l| format!("{l:.2}s")).unwrap_or_default(),
        record.usage.total_tokens.to_string(),
        record.id.clone(),
    ]
}

/// Render the page as an aligned text table plus a count footer.
fn render_listing_table(page: &TracePage) -> String {
    let rows: Vec<[String; 6]> = page.traces.iter().map(listing_row).collect();

    let mut widths: [usize; 6] = LISTING_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let render_line = |cells: &[String; 6]| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| {
                let width = *width;
                format!("{cell:<width$}")
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_owned()
    };

    out.push_str(&render_line(&LISTING_HEADERS.map(str::to_owned)));
    out.push('\n');
    for row in &rows {
        out.push_str(&render_line(row));
        out.push('\n');
    }
    out.push_str(&format!("{} of {} traces\n", rows.len(), page.total_count));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use traces::record::RecordUsage;

    fn make_record(id: &str, name: &str) -> TraceRecord {
        TraceRecord {
            id: id.to_owned(),
            project_id: "demo".to_owned(),
            timestamp: 1_722_470_400_000,
            name: name.to_owned(),
            user_id: None,
            level: "DEFAULT".to_owned(),
            observation_count: 0,
            latency: Some(1.5),
            release: None,
            version: None,
            session_id: None,
            bookmarked: false,
            tags: Vec::new(),
            scores: Vec::new(),
            usage: RecordUsage { prompt_tokens: 10, completion_tokens: 5, total_tokens: 15 },
            calculated_input_cost: None,
            calculated_output_cost: None,
            calculated_total_cost: None,
        }
    }

    #[test]
    fn table_aligns_columns_and_counts() {
        let page = TracePage {
            traces: vec![make_record("a-1", "chat"), make_record("b-2", "completion-call")],
            total_count: 42,
        };
        let table = render_listing_table(&page);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("TIMESTAMP"));
        // Both rows align the ID column despite different name widths.
        let id_col = lines[1].find("a-1").unwrap();
        assert_eq!(lines[2].find("b-2").unwrap(), id_col);
        assert_eq!(lines[3], "2 of 42 traces");
    }

    #[test]
    fn filter_validation_accepts_the_grammar() {
        assert!(validate_filter(Some("level.gte.WARNING")).is_ok());
        assert!(validate_filter(None).unwrap().is_none());
        assert!(validate_filter(Some("nonsense")).is_err());
    }

    #[test]
    fn order_validation_accepts_the_grammar() {
        assert!(validate_order(Some("latency.desc")).is_ok());
        assert!(validate_order(Some("latency.sideways")).is_err());
    }
}
