//! Spreadsheet (CSV export) ingestion.
//!
//! The sheet is addressed by header name, not position: `TEAM`, `CONF`,
//! `OVR`, `WINS` and `LOSSES` are required, `RANK` is optional. Cells are
//! split on bare commas; the export never quotes.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header, Client};
use std::collections::HashMap;
use tracing::{debug, error, info};
use url::Url;

use super::{IngestError, StandingsSource};
use crate::standings::record::{leading_digits, parse_count};
use crate::standings::{parse_record, StandingInput, TeamStanding};

/// A CSV document split into trimmed headers and raw data cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Split CSV text into header and data rows.
pub fn split_csv(text: &str) -> CsvTable {
    let mut lines = text.trim().lines();

    let headers = match lines.next() {
        Some(line) => line.split(',').map(|h| h.trim().to_string()).collect(),
        None => Vec::new(),
    };
    let rows = lines
        .map(|line| line.split(',').map(str::to_string).collect())
        .collect();

    CsvTable { headers, rows }
}

/// Column indexes resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    team: usize,
    conf: usize,
    ovr: usize,
    wins: usize,
    losses: usize,
    rank: Option<usize>,
}

impl Columns {
    fn resolve(headers: &[String]) -> Option<Columns> {
        let index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_uppercase(), i))
            .collect();

        Some(Columns {
            team: *index.get("TEAM")?,
            conf: *index.get("CONF")?,
            ovr: *index.get("OVR")?,
            wins: *index.get("WINS")?,
            losses: *index.get("LOSSES")?,
            rank: index.get("RANK").copied(),
        })
    }
}

/// Normalize a CSV table into standings, in sheet order.
///
/// Fails only when a required header is absent. Rows without a team name
/// are dropped; bad numeric cells become 0 (or unranked for `RANK`).
pub fn normalize_csv(table: &CsvTable, priority_team: &str) -> Result<Vec<TeamStanding>, IngestError> {
    let Some(cols) = Columns::resolve(&table.headers) else {
        error!("Missing required columns: {:?}", table.headers);
        return Err(IngestError::MissingColumns {
            headers: table.headers.clone(),
        });
    };

    let standings = table
        .rows
        .iter()
        .enumerate()
        .filter_map(|(order, cells)| normalize_csv_row(cells, cols, order, priority_team))
        .collect();

    Ok(standings)
}

fn normalize_csv_row(
    cells: &[String],
    cols: Columns,
    order: usize,
    priority_team: &str,
) -> Option<TeamStanding> {
    let cell = |i: usize| cells.get(i).map(|c| c.trim()).unwrap_or_default();

    if cell(cols.team).is_empty() {
        debug!("Dropping CSV row {}: no team name", order);
        return None;
    }

    // Conference wins/losses come from the record text, overall ones from the
    // dedicated WINS/LOSSES helper columns.
    let conference_record_text = cell(cols.conf).to_string();
    let conference = parse_record(&conference_record_text);

    let poll_rank = cols
        .rank
        .map(cell)
        .filter(|raw| !raw.is_empty())
        .and_then(leading_digits);

    TeamStanding::new(
        StandingInput {
            team: cell(cols.team).to_string(),
            conference_record_text,
            overall_record_text: cell(cols.ovr).to_string(),
            poll_rank,
            net_rank: None,
            conference_wins: conference.wins,
            conference_losses: conference.losses,
            overall_wins: parse_count(cell(cols.wins)),
            overall_losses: parse_count(cell(cols.losses)),
            source_order: order,
        },
        priority_team,
    )
}

/// Standings source backed by a published spreadsheet CSV export.
pub struct CsvSource {
    http: Client,
    url: Url,
    priority_team: String,
}

impl CsvSource {
    pub fn new(http: Client, url: Url, priority_team: &str) -> Self {
        CsvSource {
            http,
            url,
            priority_team: priority_team.to_string(),
        }
    }

    /// The export URL with a cache-busting timestamp appended.
    fn request_url(&self) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .append_pair("t", &Utc::now().timestamp_millis().to_string());
        url
    }
}

#[async_trait]
impl StandingsSource for CsvSource {
    fn name(&self) -> &str {
        "spreadsheet-csv"
    }

    async fn fetch_standings(&self) -> Result<Vec<TeamStanding>, IngestError> {
        let url = self.request_url();
        debug!("Fetching standings CSV from {}", url);

        let resp = self
            .http
            .get(url)
            .header(header::CACHE_CONTROL, "no-store")
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(IngestError::Fetch(format!("spreadsheet returned {}", resp.status())));
        }

        let text = resp.text().await?;
        let table = split_csv(&text);
        let standings = normalize_csv(&table, &self.priority_team)?;
        info!(
            "Parsed {} of {} spreadsheet rows",
            standings.len(),
            table.rows.len()
        );
        Ok(standings)
    }
}
