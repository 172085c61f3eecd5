//! Win-loss record parsing.
//!
//! Sheets and scraped pages disagree on the dash glyph ("9-5", "9–5", "9—5",
//! "9−5"), so every variant is folded to an ASCII hyphen before splitting.
//! Anything unparseable degrades to zero rather than failing the row.

/// A parsed "W-L" record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
}

/// Parse a "W-L" token. Never fails; missing or non-numeric parts become 0.
pub fn parse_record(text: &str) -> Record {
    let clean: String = text
        .chars()
        .map(|c| match c {
            '\u{2013}' | '\u{2014}' | '\u{2212}' => '-',
            other => other,
        })
        .collect();

    match clean.split_once('-') {
        Some((w, l)) => Record {
            wins: parse_count(w),
            // only the text up to a second hyphen counts
            losses: parse_count(l.split('-').next().unwrap_or_default()),
        },
        None => Record {
            wins: parse_count(&clean),
            losses: 0,
        },
    }
}

/// Parse the leading run of digits of a cell ("12", " 7 ", "20 (5)").
/// Returns 0 when there are none or the value overflows.
pub fn parse_count(text: &str) -> u32 {
    leading_digits(text).unwrap_or(0)
}

/// Like [`parse_count`] but distinguishes "no number" from zero.
pub fn leading_digits(text: &str) -> Option<u32> {
    let trimmed = text.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}
