use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::standings::{RelayStanding, TeamStanding};

/// One rendered line of the standings board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    /// 1-based position in the ranked order
    pub position: usize,
    /// Poll badge, only for poll-ranked teams
    pub poll_rank: Option<u32>,
    pub team: String,
    pub conference_record: String,
    pub overall_record: String,
    pub is_priority: bool,
}

/// Build display rows from an already ranked slice.
pub fn present_rows(ranked: &[TeamStanding]) -> Vec<DisplayRow> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, s)| DisplayRow {
            position: i + 1,
            poll_rank: s.is_poll_ranked().then_some(s.poll_rank),
            team: s.team.clone(),
            conference_record: s.conference_record_text.clone(),
            overall_record: s.overall_record_text.clone(),
            is_priority: s.is_priority_entity,
        })
        .collect()
}

/// JSON array mirroring the canonical standings.
pub fn to_json(ranked: &[TeamStanding]) -> serde_json::Value {
    serde_json::to_value(ranked).unwrap_or_else(|_| serde_json::Value::Array(Vec::new()))
}

/// Standings in the relay's wire shape.
pub fn to_relay(standings: &[TeamStanding]) -> Vec<RelayStanding> {
    standings.iter().map(RelayStanding::from).collect()
}

/// Board markup for a set of display rows.
pub fn render_html(rows: &[DisplayRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let class = if row.is_priority { "row priority" } else { "row" };
        let badge = row
            .poll_rank
            .map(|r| format!(r#"<span class="ap-rank">{}</span>"#, r))
            .unwrap_or_default();
        out.push_str(&format!(
            r#"<div class="{class}"><div class="rank">{pos}.</div><div class="team-cell">{badge}<span class="team-name">{team}</span></div><div class="conf">{conf}</div><div class="ovr">{ovr}</div></div>"#,
            class = class,
            pos = row.position,
            badge = badge,
            team = escape_html(&row.team),
            conf = escape_html(&row.conference_record),
            ovr = escape_html(&row.overall_record),
        ));
        out.push('\n');
    }
    out
}

/// Board markup for the fallback message shown after a failed pass.
pub fn render_message(message: &str) -> String {
    format!(r#"<div class="message">{}</div>"#, escape_html(message))
}

/// "Updated 1/9/2026, 7:05:03 PM"
pub fn format_updated<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("Updated {}", at.format("%-m/%-d/%Y, %-I:%M:%S %p"))
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standings::{rank_standings, StandingInput, DEFAULT_PRIORITY_TEAM};
    use chrono::Utc;

    fn standing(team: &str, conf: &str, poll: Option<u32>) -> TeamStanding {
        let rec = crate::standings::parse_record(conf);
        TeamStanding::new(
            StandingInput {
                team: team.into(),
                conference_record_text: conf.into(),
                overall_record_text: "20-8".into(),
                poll_rank: poll,
                conference_wins: rec.wins,
                conference_losses: rec.losses,
                overall_wins: 20,
                overall_losses: 8,
                ..Default::default()
            },
            DEFAULT_PRIORITY_TEAM,
        )
        .unwrap()
    }

    #[test]
    fn test_present_rows() {
        let ranked = rank_standings(vec![
            standing("Iowa", "8-6", None),
            standing("Wisconsin", "9-5", Some(14)),
        ]);
        let before = ranked.clone();
        let rows = present_rows(&ranked);

        assert_eq!(ranked, before);
        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[0].team, "WISCONSIN");
        assert_eq!(rows[0].poll_rank, Some(14));
        assert!(rows[0].is_priority);
        assert_eq!(rows[1].position, 2);
        assert_eq!(rows[1].poll_rank, None);
        assert!(!rows[1].is_priority);
    }

    #[test]
    fn test_render_html() {
        let rows = present_rows(&[standing("Texas A&M", "9-5", Some(3)), standing("Wisconsin", "8-6", None)]);
        let html = render_html(&rows);
        assert!(html.contains(r#"<span class="ap-rank">3</span>"#));
        assert!(html.contains("TEXAS A&amp;M"));
        assert!(html.contains(r#"<div class="row priority"><div class="rank">2.</div>"#));
        assert_eq!(html.matches("ap-rank").count(), 1);
    }

    #[test]
    fn test_to_json_field_names() {
        let json = to_json(&[standing("Iowa", "0-0", None)]);
        let first = &json[0];
        assert_eq!(first["team"], "IOWA");
        assert_eq!(first["conferenceWinPct"], -1.0);
        assert_eq!(first["pollRank"], 999);
        assert!(first["netRank"].is_null());
        assert_eq!(first["isPriorityEntity"], false);
    }

    #[test]
    fn test_format_updated() {
        let at = Utc.with_ymd_and_hms(2026, 1, 9, 19, 5, 3).unwrap();
        assert_eq!(format_updated(&at), "Updated 1/9/2026, 7:05:03 PM");
    }

    #[test]
    fn test_render_message_escapes() {
        assert_eq!(render_message("<oops>"), r#"<div class="message">&lt;oops&gt;</div>"#);
    }
}
