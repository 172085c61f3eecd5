use std::cmp::Ordering;

use super::models::TeamStanding;

/// Sort standings into display order. Position `i` in the result is rank `i + 1`.
///
/// Tie-break cascade, first difference wins:
/// conference win% ↓, conference wins ↓, overall win% ↓, overall wins ↓,
/// priority team first, poll-ranked before unranked (lower rank first),
/// team name ↑.
pub fn rank_standings(mut standings: Vec<TeamStanding>) -> Vec<TeamStanding> {
    // sort_by is stable, so only exact duplicate names keep input order
    standings.sort_by(compare_standings);
    standings
}

pub fn compare_standings(a: &TeamStanding, b: &TeamStanding) -> Ordering {
    b.conference_win_pct
        .total_cmp(&a.conference_win_pct)
        .then_with(|| b.conference_wins.cmp(&a.conference_wins))
        .then_with(|| b.overall_win_pct.total_cmp(&a.overall_win_pct))
        .then_with(|| b.overall_wins.cmp(&a.overall_wins))
        .then_with(|| b.is_priority_entity.cmp(&a.is_priority_entity))
        .then_with(|| compare_poll_rank(a, b))
        .then_with(|| a.team.cmp(&b.team))
}

fn compare_poll_rank(a: &TeamStanding, b: &TeamStanding) -> Ordering {
    match (a.is_poll_ranked(), b.is_poll_ranked()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (true, true) => a.poll_rank.cmp(&b.poll_rank),
        (false, false) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standings::models::{StandingInput, DEFAULT_PRIORITY_TEAM, UNRANKED};

    fn team(name: &str, conf: (u32, u32), overall: (u32, u32), poll: Option<u32>) -> TeamStanding {
        TeamStanding::new(
            StandingInput {
                team: name.into(),
                conference_wins: conf.0,
                conference_losses: conf.1,
                overall_wins: overall.0,
                overall_losses: overall.1,
                poll_rank: poll,
                ..Default::default()
            },
            DEFAULT_PRIORITY_TEAM,
        )
        .unwrap()
    }

    fn names(ranked: &[TeamStanding]) -> Vec<&str> {
        ranked.iter().map(|s| s.team.as_str()).collect()
    }

    #[test]
    fn test_conference_pct_then_wins() {
        // A and B both .800 in conference, B has more wins; C is .600
        let a = team("A", (8, 2), (20, 5), None);
        let b = team("B", (12, 3), (20, 5), None);
        let c = team("C", (6, 4), (25, 0), None);
        let ranked = rank_standings(vec![a, c, b]);
        assert_eq!(names(&ranked), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_overall_pct_then_overall_wins() {
        let a = team("A", (5, 5), (15, 10), None);
        let b = team("B", (5, 5), (18, 7), None);
        let c = team("C", (5, 5), (18, 12), None);
        let d = team("D", (5, 5), (24, 16), None);
        // B .720, A .600 / 15 wins, D .600 / 24 wins, C .600 / 18 wins
        let ranked = rank_standings(vec![a, b, c, d]);
        assert_eq!(names(&ranked), vec!["B", "D", "C", "A"]);
    }

    #[test]
    fn test_no_conference_games_sorts_below_winless() {
        let winless = team("WINLESS", (0, 10), (2, 20), None);
        let unplayed = team("UNPLAYED", (0, 0), (30, 0), None);
        let ranked = rank_standings(vec![unplayed, winless]);
        assert_eq!(names(&ranked), vec!["WINLESS", "UNPLAYED"]);
    }

    #[test]
    fn test_priority_team_bump() {
        let iowa = team("Iowa", (9, 5), (20, 8), Some(3));
        let wisco = team("Wisconsin", (9, 5), (20, 8), None);
        let ranked = rank_standings(vec![iowa, wisco]);
        assert_eq!(names(&ranked), vec!["WISCONSIN", "IOWA"]);
    }

    #[test]
    fn test_priority_team_does_not_beat_better_record() {
        let iowa = team("Iowa", (10, 4), (20, 8), None);
        let wisco = team("Wisconsin", (9, 5), (20, 8), Some(1));
        let ranked = rank_standings(vec![wisco, iowa]);
        assert_eq!(names(&ranked), vec!["IOWA", "WISCONSIN"]);
    }

    #[test]
    fn test_poll_ranked_before_unranked() {
        let unranked = team("AAA", (9, 5), (20, 8), None);
        let ranked = team("ZZZ", (9, 5), (20, 8), Some(15));
        let out = rank_standings(vec![unranked, ranked]);
        assert_eq!(names(&out), vec!["ZZZ", "AAA"]);
        assert_eq!(out[1].poll_rank, UNRANKED);
    }

    #[test]
    fn test_lower_poll_rank_first() {
        let seven = team("AAA", (9, 5), (20, 8), Some(7));
        let three = team("ZZZ", (9, 5), (20, 8), Some(3));
        let out = rank_standings(vec![seven, three]);
        assert_eq!(names(&out), vec!["ZZZ", "AAA"]);
    }

    #[test]
    fn test_alphabetical_fallback() {
        let purdue = team("Purdue", (9, 5), (20, 8), None);
        let iowa = team("Iowa", (9, 5), (20, 8), None);
        let out = rank_standings(vec![purdue, iowa]);
        assert_eq!(names(&out), vec!["IOWA", "PURDUE"]);
    }

    #[test]
    fn test_comparator_equal_only_for_same_name() {
        let a = team("Iowa", (9, 5), (20, 8), None);
        let b = team("Iowa", (9, 5), (20, 8), None);
        let c = team("Illinois", (9, 5), (20, 8), None);
        assert_eq!(compare_standings(&a, &b), Ordering::Equal);
        assert_ne!(compare_standings(&a, &c), Ordering::Equal);
        assert_eq!(compare_standings(&a, &c), compare_standings(&c, &a).reverse());
    }

    #[test]
    fn test_duplicates_keep_input_order() {
        let mut first = team("Iowa", (9, 5), (20, 8), None);
        first.source_order = 0;
        let mut second = team("Iowa", (9, 5), (20, 8), None);
        second.source_order = 1;
        let out = rank_standings(vec![first, second]);
        assert_eq!(out[0].source_order, 0);
        assert_eq!(out[1].source_order, 1);
    }
}
