use async_trait::async_trait;

use super::IngestError;
use crate::standings::TeamStanding;

/// Trait that every standings data source must implement.
#[async_trait]
pub trait StandingsSource: Send + Sync {
    /// Fetch and normalize one full set of standings, in source order.
    async fn fetch_standings(&self) -> Result<Vec<TeamStanding>, IngestError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
