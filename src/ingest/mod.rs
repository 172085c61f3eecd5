pub mod classify;
pub mod csv;
pub mod html;
pub mod relay;
pub mod scrape;
pub mod source;

pub use csv::CsvSource;
pub use relay::RelaySource;
pub use scrape::ScrapeSource;
pub use source::StandingsSource;

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Failure of a whole ingestion pass. Malformed individual cells never end
/// up here; they are coerced to defaults by the normalizers.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("missing required columns (headers: {headers:?})")]
    MissingColumns { headers: Vec<String> },

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl IngestError {
    /// Text shown on the board in place of the standings.
    pub fn display_message(&self) -> &'static str {
        match self {
            IngestError::MissingColumns { .. } => "Missing columns in sheet",
            IngestError::Fetch(_) | IngestError::Parse(_) => "Error loading data",
        }
    }
}

impl From<reqwest::Error> for IngestError {
    fn from(err: reqwest::Error) -> Self {
        IngestError::Fetch(err.to_string())
    }
}

/// Shared HTTP client for every source.
pub fn http_client(timeout: Duration, user_agent: &str) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .context("Failed to build HTTP client")
}
