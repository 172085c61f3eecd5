//! Periodic ingest → rank → render loop.
//!
//! A pass fetches from the configured source, ranks, and replaces the render
//! target wholesale. Failed passes put the fallback message up and the loop
//! carries on; the next successful pass takes the board back.

pub mod board;

pub use board::{Board, BoardSnapshot};

use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::{interval_at, Interval, MissedTickBehavior};
use tracing::{error, info};

use crate::ingest::{IngestError, StandingsSource};
use crate::standings::{rank_standings, TeamStanding};

/// Output surface for the standings.
#[async_trait]
pub trait RenderTarget: Send + Sync {
    /// Replace the surface with a freshly ranked set of standings.
    async fn show_standings(&self, ranked: &[TeamStanding], updated_at: DateTime<Local>);

    /// Replace the surface with a single user-visible message.
    async fn show_message(&self, message: &str);
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Drives the refresh schedule. Returning `false` ends the loop.
#[async_trait]
pub trait Ticker: Send {
    async fn tick(&mut self) -> bool;
}

/// Fixed-period ticker. The startup pass runs before the first tick, so the
/// first tick fires one full period after construction.
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval_at(tokio::time::Instant::now() + period, period);
        // passes run one at a time; a slow pass swallows ticks instead of
        // queueing a burst behind it
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        IntervalTicker { interval }
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) -> bool {
        self.interval.tick().await;
        true
    }
}

pub struct RefreshOrchestrator {
    source: Arc<dyn StandingsSource>,
    target: Arc<dyn RenderTarget>,
    clock: Arc<dyn Clock>,
}

impl RefreshOrchestrator {
    pub fn new(
        source: Arc<dyn StandingsSource>,
        target: Arc<dyn RenderTarget>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        RefreshOrchestrator {
            source,
            target,
            clock,
        }
    }

    /// Run one pass. Returns the number of teams rendered.
    pub async fn run_once(&self) -> Result<usize, IngestError> {
        let started = Instant::now();
        let standings = self.source.fetch_standings().await?;
        let ranked = rank_standings(standings);
        self.target.show_standings(&ranked, self.clock.now()).await;
        info!(
            "Standings refreshed from {}: {} teams in {:?}",
            self.source.name(),
            ranked.len(),
            started.elapsed()
        );
        Ok(ranked.len())
    }

    /// Run a pass now and after every tick until the ticker stops.
    /// Failures are rendered as the fallback message and never end the loop.
    pub async fn run<T: Ticker>(&self, mut ticker: T) {
        loop {
            if let Err(e) = self.run_once().await {
                error!("Standings refresh from {} failed: {}", self.source.name(), e);
                self.target.show_message(e.display_message()).await;
            }
            if !ticker.tick().await {
                break;
            }
        }
    }
}
