use std::io::Write;

use doctordork_search::{jurisdiction, MEDICAL_BOARD_KEY};
use doctordork_storage::HistoryEntry;
use tracing::warn;

use crate::app::App;
use crate::commands::search_cmd::remember;

/// Print one board, or all of them for `ALL`.
pub fn run<W: Write>(app: &mut App, code: &str, open: bool, out: &mut W) -> anyhow::Result<()> {
    if code.trim().eq_ignore_ascii_case("all") {
        return list(out);
    }

    let board = app.board_lookup(code)?;
    writeln!(out, "Medical Board: {}", board.name)?;
    writeln!(out, "URL: {}", board.url)?;
    remember(
        app,
        HistoryEntry::new(MEDICAL_BOARD_KEY)
            .with_state(board.code)
            .with_url(board.url),
        out,
    )?;

    if open {
        if let Err(e) = app.open(board.url) {
            warn!(error = %e, "Failed to open board website");
            writeln!(out, "✗ Could not open browser: {}", e)?;
        }
    }
    Ok(())
}

pub fn list<W: Write>(out: &mut W) -> anyhow::Result<()> {
    for board in jurisdiction::all() {
        writeln!(out, "{} - {:<20} {}", board.code, board.name, board.url)?;
    }
    writeln!(out)?;
    writeln!(out, "Total: {} jurisdictions", jurisdiction::count())?;
    Ok(())
}
