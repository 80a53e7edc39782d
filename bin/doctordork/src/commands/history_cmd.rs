use std::io::Write;

use chrono::DateTime;
use doctordork_storage::{HistoryEntry, HistoryStore};

/// `2024-03-09 14:05:07 - review_aggregation - John Smith`
pub fn describe(entry: &HistoryEntry) -> String {
    let when = DateTime::parse_from_rfc3339(&entry.timestamp)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| {
            if entry.timestamp.is_empty() {
                "Unknown".to_string()
            } else {
                entry.timestamp.clone()
            }
        });
    let who = entry
        .doctor_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .or(entry.state.as_deref())
        .unwrap_or("N/A");
    format!("{} - {} - {}", when, entry.kind, who)
}

/// Print the most recent entries, newest first.
pub fn list<W: Write>(history: &HistoryStore, limit: usize, out: &mut W) -> anyhow::Result<()> {
    if history.is_empty() {
        writeln!(out, "(No search history)")?;
        return Ok(());
    }

    let recent = history.recent(limit);
    writeln!(out)?;
    writeln!(
        out,
        "📜 Search history (showing {}, {} total)",
        recent.len(),
        history.len()
    )?;
    writeln!(out)?;
    for (idx, entry) in recent.iter().enumerate() {
        writeln!(out, "  {:>3}. {}", idx + 1, describe(entry))?;
        if let Some(url) = &entry.url {
            writeln!(out, "       {}", url)?;
        }
    }
    Ok(())
}

pub fn clear<W: Write>(history: &mut HistoryStore, out: &mut W) -> anyhow::Result<()> {
    let removed = history.len();
    history.clear()?;
    writeln!(out, "✓ Cleared {} history entries", removed)?;
    Ok(())
}
