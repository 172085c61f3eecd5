//! In-memory render target shared between the refresh loop and the HTTP layer.

use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::RenderTarget;
use crate::presenter::{format_updated, present_rows, DisplayRow};
use crate::standings::TeamStanding;

/// What the board currently shows.
#[derive(Debug, Clone, Default)]
pub struct BoardSnapshot {
    /// Rows of the last successful pass
    pub rows: Vec<DisplayRow>,
    /// Ranked standings of the last successful pass
    pub standings: Vec<TeamStanding>,
    /// "Updated ..." label of the last successful pass
    pub updated: Option<String>,
    /// Fallback message; replaces the rows on the page while set
    pub message: Option<String>,
}

/// Thread-safe standings board.
#[derive(Clone, Default)]
pub struct Board {
    inner: Arc<RwLock<BoardSnapshot>>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> BoardSnapshot {
        self.inner.read().await.clone()
    }
}

#[async_trait]
impl RenderTarget for Board {
    async fn show_standings(&self, ranked: &[TeamStanding], updated_at: DateTime<Local>) {
        let rows = present_rows(ranked);
        let mut inner = self.inner.write().await;
        inner.rows = rows;
        inner.standings = ranked.to_vec();
        inner.updated = Some(format_updated(&updated_at));
        inner.message = None;
    }

    async fn show_message(&self, message: &str) {
        self.inner.write().await.message = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standings::{StandingInput, DEFAULT_PRIORITY_TEAM};
    use chrono::TimeZone;

    fn iowa() -> TeamStanding {
        TeamStanding::new(
            StandingInput {
                team: "Iowa".into(),
                conference_record_text: "9-5".into(),
                conference_wins: 9,
                conference_losses: 5,
                ..Default::default()
            },
            DEFAULT_PRIORITY_TEAM,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_message_replaces_and_success_clears() {
        let board = Board::new();
        let at = Local.with_ymd_and_hms(2026, 2, 1, 9, 30, 0).unwrap();

        board.show_standings(&[iowa()], at).await;
        board.show_message("Error loading data").await;
        let snap = board.snapshot().await;
        assert_eq!(snap.message.as_deref(), Some("Error loading data"));
        // last good standings stay available
        assert_eq!(snap.standings.len(), 1);
        assert_eq!(snap.updated.as_deref(), Some("Updated 2/1/2026, 9:30:00 AM"));

        board.show_standings(&[iowa()], at).await;
        assert!(board.snapshot().await.message.is_none());
    }
}
