//! Plain-text ranking table for non-interactive output.

use std::fmt::Write;

use crate::leaderboard::Record;
use crate::types::Mode;

/// Render `records` (already ranked) as an aligned table.
pub fn ranking_table(filter: Option<Mode>, records: &[&Record]) -> String {
    let mut out = String::new();
    let title = filter.map_or("All modes", |m| m.as_str());
    let _ = writeln!(out, "Ranking: {}", title);

    if records.is_empty() {
        out.push_str("(no scores yet)\n");
        return out;
    }

    let name_w = records
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let _ = writeln!(
        out,
        "{:>3}  {:<name_w$}  {:<6}  {:>8}  {:>5}  {:>5}  {}",
        "#", "NAME", "MODE", "SCORE", "LEVEL", "LINES", "DATE"
    );
    for (i, r) in records.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<name_w$}  {:<6}  {:>8}  {:>5}  {:>5}  {}",
            i + 1,
            r.name,
            r.mode.as_str(),
            r.score,
            r.level,
            r.lines,
            short_date(&r.timestamp)
        );
    }
    out
}

/// `YYYY-MM-DD HH:MM` prefix of an ISO-8601 timestamp.
fn short_date(ts: &str) -> String {
    ts.chars()
        .take(16)
        .map(|c| if c == 'T' { ' ' } else { c })
        .collect()
}
