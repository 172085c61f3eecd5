//! Plain-regex HTML table extraction for the scrape path.
//!
//! The standings page is one flat table; a real DOM parser buys nothing here,
//! and the pick heuristic ("first table with a hyphen and a `<td`") is textual.

use once_cell::sync::Lazy;
use regex::Regex;

use super::IngestError;

static TABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<table[^>]*>.*?</table>").expect("valid table regex"));
static ROW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<tr[^>]*>(.*?)</tr>").expect("valid row regex"));
static CELL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<td[^>]*>(.*?)</td>").expect("valid cell regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Decoded in this order, so "&amp;lt;" ends up as "<".
const ENTITIES: [(&str, &str); 6] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
];

static ENTITY_RES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    ENTITIES
        .iter()
        .map(|(entity, text)| {
            let re = Regex::new(&format!("(?i){}", regex::escape(entity))).expect("valid entity regex");
            (re, *text)
        })
        .collect()
});

/// Remove tags, decode the common entities and collapse whitespace.
pub fn strip_markup(html: &str) -> String {
    let mut text = TAG_RE.replace_all(html, "").into_owned();
    for (re, replacement) in ENTITY_RES.iter() {
        text = re.replace_all(&text, *replacement).into_owned();
    }
    WS_RE.replace_all(&text, " ").trim().to_string()
}

/// Pick the standings table: the first `<table>` containing both a hyphen
/// and at least one `<td`.
pub fn find_standings_table(html: &str) -> Result<&str, IngestError> {
    let mut tables = TABLE_RE.find_iter(html).map(|m| m.as_str()).peekable();
    if tables.peek().is_none() {
        return Err(IngestError::Parse("No tables found in HTML".into()));
    }
    tables
        .find(|t| t.contains('-') && t.contains("<td"))
        .ok_or_else(|| IngestError::Parse("Could not find standings table".into()))
}

/// Extract the stripped cell text of each data row in a table.
///
/// The first `<tr>` is treated as the header and any row containing a `<th`
/// is skipped. Rows with fewer than three cells cannot hold a team and two
/// records and are skipped too.
pub fn table_rows(table: &str) -> Vec<Vec<String>> {
    ROW_RE
        .captures_iter(table)
        .skip(1)
        .filter_map(|caps| {
            let row = caps.get(1)?.as_str();
            if row.contains("<th") {
                return None;
            }
            let cells: Vec<String> = CELL_RE
                .captures_iter(row)
                .filter_map(|c| c.get(1).map(|m| strip_markup(m.as_str())))
                .collect();
            (cells.len() >= 3).then_some(cells)
        })
        .collect()
}
