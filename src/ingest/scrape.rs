use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use super::classify::classify_cells;
use super::html::{find_standings_table, table_rows};
use super::{IngestError, StandingsSource};
use crate::standings::{parse_record, StandingInput, TeamStanding};

/// Normalize one row of stripped cell text. Rows without a team name or a
/// conference record yield `None`.
pub fn normalize_scraped_row<S: AsRef<str>>(
    cells: &[S],
    order: usize,
    priority_team: &str,
) -> Option<TeamStanding> {
    let row = classify_cells(cells);
    if !row.is_complete() {
        debug!("Dropping scraped row {}: {:?}", order, row);
        return None;
    }

    let conference_record_text = row.conference_record.unwrap_or_default();
    let conference = parse_record(&conference_record_text);
    // without an overall column the conference record stands in for it
    let overall_record_text = row
        .overall_record
        .unwrap_or_else(|| conference_record_text.clone());
    let overall = parse_record(&overall_record_text);

    TeamStanding::new(
        StandingInput {
            team: row.team,
            conference_record_text,
            overall_record_text,
            poll_rank: row.poll_rank,
            net_rank: row.net_rank,
            conference_wins: conference.wins,
            conference_losses: conference.losses,
            overall_wins: overall.wins,
            overall_losses: overall.losses,
            source_order: order,
        },
        priority_team,
    )
}

/// Extract standings from a full standings page.
pub fn parse_standings_html(html: &str, priority_team: &str) -> Result<Vec<TeamStanding>, IngestError> {
    let table = find_standings_table(html)?;
    let standings: Vec<TeamStanding> = table_rows(table)
        .iter()
        .enumerate()
        .filter_map(|(order, cells)| normalize_scraped_row(cells, order, priority_team))
        .collect();

    if standings.is_empty() {
        return Err(IngestError::Parse("No standings data found".into()));
    }
    Ok(standings)
}

/// Standings source that scrapes a third-party HTML standings page.
pub struct ScrapeSource {
    http: Client,
    url: Url,
    priority_team: String,
}

impl ScrapeSource {
    pub fn new(http: Client, url: Url, priority_team: &str) -> Self {
        ScrapeSource {
            http,
            url,
            priority_team: priority_team.to_string(),
        }
    }
}

#[async_trait]
impl StandingsSource for ScrapeSource {
    fn name(&self) -> &str {
        "html-scrape"
    }

    async fn fetch_standings(&self) -> Result<Vec<TeamStanding>, IngestError> {
        debug!("Scraping standings from {}", self.url);

        let resp = self.http.get(self.url.clone()).send().await?;
        if !resp.status().is_success() {
            return Err(IngestError::Fetch(format!("upstream returned {}", resp.status())));
        }

        let html = resp.text().await?;
        let standings = parse_standings_html(&html, &self.priority_team)?;
        info!("Scraped {} standings rows from {}", standings.len(), self.url);
        Ok(standings)
    }
}
