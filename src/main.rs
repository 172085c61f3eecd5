use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

mod config;
mod ingest;
mod presenter;
mod refresh;
mod server;
mod standings;

use config::{http_url, Config, SourceKind};
use ingest::{http_client, CsvSource, RelaySource, ScrapeSource, StandingsSource};
use refresh::{Board, IntervalTicker, RefreshOrchestrator, SystemClock};
use server::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let priority_team = config.priority_team();
    let http = http_client(config.fetch_timeout(), &config.user_agent)?;

    // The relay endpoint always scrapes; the board reads whichever source is configured.
    let scrape: Arc<dyn StandingsSource> = Arc::new(ScrapeSource::new(
        http.clone(),
        http_url(&config.scrape_url)?,
        &priority_team,
    ));

    let board_source: Arc<dyn StandingsSource> = match config.source {
        SourceKind::Csv => Arc::new(CsvSource::new(
            http.clone(),
            http_url(&config.csv_url)?,
            &priority_team,
        )),
        SourceKind::Scrape => scrape.clone(),
        SourceKind::Relay => {
            let relay_url = config
                .relay_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("RELAY_URL is required for the relay source"))?;
            Arc::new(RelaySource::new(http.clone(), http_url(relay_url)?, &priority_team))
        }
    };

    info!(
        "Board source: {} (refresh every {:?}, priority team {})",
        board_source.name(),
        config.refresh_interval(),
        priority_team
    );

    let board = Board::new();

    // Refresh loop in its own task
    let orchestrator = RefreshOrchestrator::new(
        board_source,
        Arc::new(board.clone()),
        Arc::new(SystemClock),
    );
    let ticker = IntervalTicker::new(config.refresh_interval());
    tokio::spawn(async move {
        orchestrator.run(ticker).await;
    });

    let app = server::router(AppState {
        board,
        relay_source: scrape,
        relay_cache_secs: config.relay_cache_secs,
        refresh_interval_secs: config.refresh_interval_secs,
    });
    let addr = config.listen_addr()?;
    info!("Standings board listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Serve until shutdown
    axum::serve(listener, app).await?;

    Ok(())
}
