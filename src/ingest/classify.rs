//! Best-effort classification of scraped table cells.
//!
//! Scraped rows have no reliable column order, so each cell is judged on its
//! shape alone: "9-5" is a record, a short bare number is a poll rank, a
//! longer one a NET rank, and the first wordy cell is the team.
//!
//! A NET rank of 1-25 written in one or two digits is indistinguishable from
//! a poll rank and is classified as one.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::standings::UNRANKED;

/// Only the first few cells of a row are considered.
const MAX_CELLS: usize = 8;
const MAX_POLL_RANK: u32 = 25;
const MAX_NET_RANK: u32 = 400;

static RECORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+-[0-9]+$").expect("valid record regex"));
static INTEGER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid integer regex"));
static RANKED_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)\s+(.+)$").expect("valid ranked-name regex"));
static NUMBERING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+\.\s*").expect("valid numbering regex"));
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Fields recovered from one scraped row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedRow {
    /// Cleaned team name, original casing; empty if none was found
    pub team: String,
    pub conference_record: Option<String>,
    pub overall_record: Option<String>,
    pub poll_rank: Option<u32>,
    pub net_rank: Option<u32>,
}

impl ClassifiedRow {
    /// A row needs both a team name and a conference record to be kept.
    pub fn is_complete(&self) -> bool {
        !self.team.is_empty() && self.conference_record.is_some()
    }
}

/// Classify the cells of one row.
pub fn classify_cells<S: AsRef<str>>(cells: &[S]) -> ClassifiedRow {
    let mut row = ClassifiedRow::default();
    let mut team_candidate: Option<&str> = None;

    for cell in cells.iter().take(MAX_CELLS) {
        let cell: &str = cell.as_ref();
        if cell.is_empty() {
            continue;
        }

        if RECORD_RE.is_match(cell) {
            if row.conference_record.is_none() {
                row.conference_record = Some(cell.to_string());
            } else if row.overall_record.is_none() {
                row.overall_record = Some(cell.to_string());
            }
        } else if INTEGER_RE.is_match(cell) {
            // digits only, so parse can only fail on overflow
            let Ok(value) = cell.parse::<u32>() else {
                continue;
            };
            if value <= MAX_POLL_RANK && cell.len() <= 2 {
                if row.poll_rank.is_none() {
                    row.poll_rank = Some(value);
                }
            } else if value > 0 && value <= MAX_NET_RANK && row.net_rank.is_none() {
                row.net_rank = Some(value);
            }
        } else if cell.chars().count() > 2 && team_candidate.is_none() {
            team_candidate = Some(cell);
        }
    }

    let mut name = team_candidate.unwrap_or_default();

    // "5 Purdue": a poll rank glued onto the name overrides any rank cell
    if let Some(caps) = RANKED_NAME_RE.captures(name) {
        if let (Some(rank), Some(rest)) = (caps.get(1), caps.get(2)) {
            // an unparseable rank still overrides, as unranked
            row.poll_rank = Some(rank.as_str().parse().unwrap_or(UNRANKED));
            name = rest.as_str();
        }
    }

    let name = NUMBERING_RE.replace(name, "");
    row.team = WS_RE.replace_all(&name, " ").trim().to_string();
    row
}
