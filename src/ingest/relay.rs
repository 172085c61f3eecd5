use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use super::{IngestError, StandingsSource};
use crate::standings::{RelayPayload, TeamStanding};

/// Decode a relay response body into canonical standings.
///
/// Win percentages and the priority flag are recomputed locally rather than
/// trusted from the wire.
pub fn parse_relay_body(raw: serde_json::Value, priority_team: &str) -> Result<Vec<TeamStanding>, IngestError> {
    if let Some(message) = raw.get("error").and_then(|e| e.as_str()) {
        return Err(IngestError::Parse(format!("relay reported: {}", message)));
    }

    let payload: RelayPayload = serde_json::from_value(raw)
        .map_err(|e| IngestError::Parse(format!("unexpected relay body: {}", e)))?;

    let standings: Vec<TeamStanding> = payload
        .standings
        .into_iter()
        .enumerate()
        .filter_map(|(order, relay)| TeamStanding::from_relay(relay, order, priority_team))
        .collect();

    if standings.is_empty() {
        return Err(IngestError::Parse("No standings data found".into()));
    }
    Ok(standings)
}

/// Standings source that reads from a deployed scrape relay.
pub struct RelaySource {
    http: Client,
    url: Url,
    priority_team: String,
}

impl RelaySource {
    pub fn new(http: Client, url: Url, priority_team: &str) -> Self {
        RelaySource {
            http,
            url,
            priority_team: priority_team.to_string(),
        }
    }
}

#[async_trait]
impl StandingsSource for RelaySource {
    fn name(&self) -> &str {
        "scrape-relay"
    }

    async fn fetch_standings(&self) -> Result<Vec<TeamStanding>, IngestError> {
        debug!("Fetching relay standings from {}", self.url);

        let resp = self.http.get(self.url.clone()).send().await?;
        let status = resp.status();
        let raw: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| IngestError::Fetch(format!("relay returned {}: {}", status, e)))?;

        // the relay answers failures with a JSON error body, so decode first
        let standings = parse_relay_body(raw, &self.priority_team)?;
        if !status.is_success() {
            return Err(IngestError::Fetch(format!("relay returned {}", status)));
        }
        info!("Relay returned {} standings rows", standings.len());
        Ok(standings)
    }
}
