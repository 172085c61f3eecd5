use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

/// Where the board gets its standings from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// Published spreadsheet CSV export
    Csv,
    /// Scrape the standings page directly
    Scrape,
    /// Read a deployed scrape relay
    Relay,
}

/// Conference standings board and scrape relay
#[derive(Parser, Debug, Clone)]
#[command(name = "conference-standings", version, about)]
pub struct Config {
    /// Data source for the board
    #[arg(long, env = "STANDINGS_SOURCE", value_enum, default_value = "csv")]
    pub source: SourceKind,

    /// Spreadsheet CSV export URL
    #[arg(
        long,
        env = "CSV_URL",
        default_value = "https://docs.google.com/spreadsheets/d/1bOdPDPKf1QHUyayNgDToaCtu3k6_-bccnWLNqpyayvQ/export?format=csv&gid=1204601349"
    )]
    pub csv_url: String,

    /// Third-party HTML standings page (scrape source and /relay endpoint)
    #[arg(
        long,
        env = "SCRAPE_URL",
        default_value = "https://www.warrennolan.com/basketball/2026/conference/Big-Ten"
    )]
    pub scrape_url: String,

    /// Remote scrape relay URL (required with --source relay)
    #[arg(long, env = "RELAY_URL")]
    pub relay_url: Option<String>,

    /// HTTP listen address for the board and relay
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: String,

    /// Seconds between refresh passes
    #[arg(long, env = "REFRESH_INTERVAL_SECS", default_value = "900")]
    pub refresh_interval_secs: u64,

    /// Timeout for each upstream fetch in seconds
    #[arg(long, env = "FETCH_TIMEOUT_SECS", default_value = "10")]
    pub fetch_timeout_secs: u64,

    /// Team that wins exact-equal-record ties
    #[arg(long, env = "PRIORITY_TEAM", default_value = crate::standings::DEFAULT_PRIORITY_TEAM)]
    pub priority_team: String,

    /// User-Agent sent to upstream pages
    #[arg(
        long,
        env = "SCRAPE_USER_AGENT",
        default_value = "Mozilla/5.0 (compatible; BigTenStandings/1.0)"
    )]
    pub user_agent: String,

    /// Cache-Control max-age for successful relay responses
    #[arg(long, env = "RELAY_CACHE_SECS", default_value = "300")]
    pub relay_cache_secs: u64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.refresh_interval_secs == 0 {
            anyhow::bail!("refresh_interval_secs must be positive");
        }
        if self.fetch_timeout_secs == 0 {
            anyhow::bail!("fetch_timeout_secs must be positive");
        }
        if self.priority_team.trim().is_empty() {
            anyhow::bail!("priority_team must not be empty");
        }
        self.listen_addr()?;
        http_url(&self.csv_url).context("invalid CSV_URL")?;
        http_url(&self.scrape_url).context("invalid SCRAPE_URL")?;
        match (&self.source, &self.relay_url) {
            (SourceKind::Relay, None) => {
                anyhow::bail!("RELAY_URL is required when the source is 'relay'")
            }
            (_, Some(relay)) => {
                http_url(relay).context("invalid RELAY_URL")?;
            }
            _ => {}
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> anyhow::Result<SocketAddr> {
        self.listen_addr
            .parse()
            .with_context(|| format!("invalid listen address '{}'", self.listen_addr))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Priority team in the canonical (trimmed, uppercased) form.
    pub fn priority_team(&self) -> String {
        self.priority_team.trim().to_uppercase()
    }
}

/// Parse a URL, accepting only http and https.
pub fn http_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("'{}' is not a URL", raw))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => anyhow::bail!("unsupported URL scheme '{}'", other),
    }
}
