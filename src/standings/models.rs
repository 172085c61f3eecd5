use serde::{Deserialize, Serialize};

/// Poll-rank sentinel for teams without a poll ranking.
pub const UNRANKED: u32 = 999;

/// Team that wins an exact-equal-record tie before poll rank is consulted.
pub const DEFAULT_PRIORITY_TEAM: &str = "WISCONSIN";

/// One team's row in the conference standings.
///
/// Built once per ingestion pass through [`TeamStanding::new`], which derives
/// both win percentages and the priority flag; the fields are not updated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    /// Uppercased, trimmed display name (never empty)
    pub team: String,
    /// Conference record as it appeared in the source, e.g. "9-5"
    pub conference_record_text: String,
    pub overall_record_text: String,
    /// 1..=998, or [`UNRANKED`]
    pub poll_rank: u32,
    /// Secondary ranking signal from the scrape path; never used for sorting
    pub net_rank: Option<u32>,
    pub conference_wins: u32,
    pub conference_losses: u32,
    pub overall_wins: u32,
    pub overall_losses: u32,
    /// -1.0 when no conference games have been played
    pub conference_win_pct: f64,
    /// 0.0 when no games have been played
    pub overall_win_pct: f64,
    pub is_priority_entity: bool,
    /// 0-based row index in the source
    pub source_order: usize,
}

/// Raw field values collected by a row normalizer.
#[derive(Debug, Clone, Default)]
pub struct StandingInput {
    pub team: String,
    pub conference_record_text: String,
    pub overall_record_text: String,
    pub poll_rank: Option<u32>,
    pub net_rank: Option<u32>,
    pub conference_wins: u32,
    pub conference_losses: u32,
    pub overall_wins: u32,
    pub overall_losses: u32,
    pub source_order: usize,
}

impl TeamStanding {
    /// Canonicalise a normalized row. Returns `None` when the team name is
    /// blank after trimming, which drops the row.
    pub fn new(input: StandingInput, priority_team: &str) -> Option<Self> {
        let team = input.team.trim().to_uppercase();
        if team.is_empty() {
            return None;
        }

        // u64 so that huge coerced counts cannot overflow the sum
        let conference_games = u64::from(input.conference_wins) + u64::from(input.conference_losses);
        let conference_win_pct = if conference_games == 0 {
            -1.0
        } else {
            input.conference_wins as f64 / conference_games as f64
        };

        let overall_games = u64::from(input.overall_wins) + u64::from(input.overall_losses);
        let overall_win_pct = if overall_games == 0 {
            0.0
        } else {
            input.overall_wins as f64 / overall_games as f64
        };

        let is_priority_entity = team == priority_team;

        Some(TeamStanding {
            team,
            conference_record_text: input.conference_record_text,
            overall_record_text: input.overall_record_text,
            poll_rank: input.poll_rank.map_or(UNRANKED, clamp_poll_rank),
            net_rank: input.net_rank,
            conference_wins: input.conference_wins,
            conference_losses: input.conference_losses,
            overall_wins: input.overall_wins,
            overall_losses: input.overall_losses,
            conference_win_pct,
            overall_win_pct,
            is_priority_entity,
            source_order: input.source_order,
        })
    }

    pub fn is_poll_ranked(&self) -> bool {
        self.poll_rank < UNRANKED
    }

    /// Rebuild a canonical standing from a relay payload entry.
    pub fn from_relay(relay: RelayStanding, source_order: usize, priority_team: &str) -> Option<Self> {
        TeamStanding::new(
            StandingInput {
                team: relay.team,
                conference_record_text: relay.conf,
                overall_record_text: relay.ovr,
                poll_rank: Some(relay.ap_rank),
                net_rank: relay.net_rank,
                conference_wins: relay.conf_wins,
                conference_losses: relay.conf_losses,
                overall_wins: relay.wins,
                overall_losses: relay.losses,
                source_order,
            },
            priority_team,
        )
    }
}

fn clamp_poll_rank(rank: u32) -> u32 {
    if (1..UNRANKED).contains(&rank) {
        rank
    } else {
        UNRANKED
    }
}

/// Wire shape of a standing in the scrape relay's `{ "standings": [...] }` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayStanding {
    pub team: String,
    pub conf: String,
    pub ovr: String,
    #[serde(default = "unranked")]
    pub ap_rank: u32,
    #[serde(default)]
    pub net_rank: Option<u32>,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub conf_wins: u32,
    #[serde(default)]
    pub conf_losses: u32,
}

fn unranked() -> u32 {
    UNRANKED
}

impl From<&TeamStanding> for RelayStanding {
    fn from(s: &TeamStanding) -> Self {
        RelayStanding {
            team: s.team.clone(),
            conf: s.conference_record_text.clone(),
            ovr: s.overall_record_text.clone(),
            ap_rank: s.poll_rank,
            net_rank: s.net_rank,
            wins: s.overall_wins,
            losses: s.overall_losses,
            conf_wins: s.conference_wins,
            conf_losses: s.conference_losses,
        }
    }
}

/// Body returned by the scrape relay on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayPayload {
    pub standings: Vec<RelayStanding>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn input(team: &str, conf: (u32, u32), overall: (u32, u32)) -> StandingInput {
        StandingInput {
            team: team.into(),
            conference_wins: conf.0,
            conference_losses: conf.1,
            overall_wins: overall.0,
            overall_losses: overall.1,
            ..Default::default()
        }
    }

    #[test]
    fn test_team_is_trimmed_and_uppercased() {
        let s = TeamStanding::new(input("  Ohio State ", (1, 1), (2, 2)), DEFAULT_PRIORITY_TEAM).unwrap();
        assert_eq!(s.team, "OHIO STATE");
    }

    #[test]
    fn test_blank_team_is_dropped() {
        assert!(TeamStanding::new(input("   ", (1, 1), (2, 2)), DEFAULT_PRIORITY_TEAM).is_none());
    }

    #[test]
    fn test_win_pct_sentinels_differ() {
        let s = TeamStanding::new(input("Iowa", (0, 0), (0, 0)), DEFAULT_PRIORITY_TEAM).unwrap();
        assert_relative_eq!(s.conference_win_pct, -1.0);
        assert_relative_eq!(s.overall_win_pct, 0.0);
    }

    #[test]
    fn test_win_pct_values() {
        let s = TeamStanding::new(input("Iowa", (9, 3), (20, 5)), DEFAULT_PRIORITY_TEAM).unwrap();
        assert_relative_eq!(s.conference_win_pct, 0.75, epsilon = 1e-9);
        assert_relative_eq!(s.overall_win_pct, 0.8, epsilon = 1e-9);
    }

    #[test]
    fn test_huge_counts_do_not_overflow() {
        let s = TeamStanding::new(input("Iowa", (u32::MAX, 1), (u32::MAX, 1)), DEFAULT_PRIORITY_TEAM).unwrap();
        assert!(s.conference_win_pct > 0.99 && s.conference_win_pct < 1.0);
        assert!(s.overall_win_pct > 0.99 && s.overall_win_pct < 1.0);
    }

    #[test]
    fn test_priority_flag_is_exact_match() {
        let yes = TeamStanding::new(input("wisconsin", (1, 0), (1, 0)), DEFAULT_PRIORITY_TEAM).unwrap();
        let no = TeamStanding::new(input("Wisconsin-Green Bay", (1, 0), (1, 0)), DEFAULT_PRIORITY_TEAM).unwrap();
        assert!(yes.is_priority_entity);
        assert!(!no.is_priority_entity);

        let custom = TeamStanding::new(input("Purdue", (1, 0), (1, 0)), "PURDUE").unwrap();
        assert!(custom.is_priority_entity);
    }

    #[test]
    fn test_poll_rank_clamped_to_unranked() {
        let mut i = input("Iowa", (1, 0), (1, 0));
        i.poll_rank = Some(0);
        assert_eq!(TeamStanding::new(i.clone(), DEFAULT_PRIORITY_TEAM).unwrap().poll_rank, UNRANKED);
        i.poll_rank = Some(1200);
        assert_eq!(TeamStanding::new(i.clone(), DEFAULT_PRIORITY_TEAM).unwrap().poll_rank, UNRANKED);
        i.poll_rank = Some(998);
        assert_eq!(TeamStanding::new(i.clone(), DEFAULT_PRIORITY_TEAM).unwrap().poll_rank, 998);
        i.poll_rank = None;
        assert!(!TeamStanding::new(i, DEFAULT_PRIORITY_TEAM).unwrap().is_poll_ranked());
    }

    #[test]
    fn test_relay_wire_names() {
        let s = TeamStanding::new(
            StandingInput {
                team: "Purdue".into(),
                conference_record_text: "9-5".into(),
                overall_record_text: "20-8".into(),
                poll_rank: Some(5),
                net_rank: Some(12),
                conference_wins: 9,
                conference_losses: 5,
                overall_wins: 20,
                overall_losses: 8,
                source_order: 0,
            },
            DEFAULT_PRIORITY_TEAM,
        )
        .unwrap();
        let json = serde_json::to_value(RelayStanding::from(&s)).unwrap();
        assert_eq!(json["apRank"], 5);
        assert_eq!(json["netRank"], 12);
        assert_eq!(json["confWins"], 9);
        assert_eq!(json["ovr"], "20-8");
    }

    #[test]
    fn test_from_relay_recomputes_derived_fields() {
        let relay: RelayStanding = serde_json::from_str(
            r#"{"team":"WISCONSIN","conf":"0-0","ovr":"3-1","apRank":999,"netRank":null,"wins":3,"losses":1,"confWins":0,"confLosses":0}"#,
        )
        .unwrap();
        let s = TeamStanding::from_relay(relay, 4, DEFAULT_PRIORITY_TEAM).unwrap();
        assert_relative_eq!(s.conference_win_pct, -1.0);
        assert_relative_eq!(s.overall_win_pct, 0.75, epsilon = 1e-9);
        assert!(s.is_priority_entity);
        assert_eq!(s.source_order, 4);
        assert_eq!(s.poll_rank, UNRANKED);
    }
}
