use std::io::Write;

use doctordork_core::{DoctorIdentity, ExportFormat, ResultEntry};
use doctordork_search::{Category, CONTACT_SEARCH_KEY, MEDICAL_BOARD_KEY};
use doctordork_storage::HistoryEntry;
use tracing::warn;

use crate::app::App;

/// Appends to history, printing a warning instead of failing the command.
pub fn remember<W: Write>(app: &mut App, entry: HistoryEntry, out: &mut W) -> anyhow::Result<()> {
    if let Err(e) = app.remember(entry) {
        warn!(error = %e, "Failed to save history");
        writeln!(out, "⚠ Could not save history: {}", e)?;
    }
    Ok(())
}

fn print_section<W: Write>(out: &mut W, title: &str, entries: &[ResultEntry]) -> anyhow::Result<()> {
    let width = entries
        .iter()
        .map(|e| e.platform.chars().count())
        .max()
        .unwrap_or(0);
    writeln!(out)?;
    writeln!(out, "== {} ({}) ==", title, entries.len())?;
    for entry in entries {
        writeln!(out, "  {:<width$}  {}", entry.platform, entry.url, width = width)?;
    }
    Ok(())
}

/// Opens every URL recorded so far in this run.
pub fn open_recorded<W: Write>(app: &mut App, out: &mut W) -> anyhow::Result<()> {
    let targets: Vec<(String, String)> = app
        .results
        .entries()
        .map(|e| (e.platform.clone(), e.url.clone()))
        .collect();
    for (platform, url) in targets {
        match app.open(&url) {
            Ok(()) => writeln!(out, "✓ Opened {}", platform)?,
            Err(e) => {
                warn!(error = %e, platform = %platform, "Failed to open URL");
                writeln!(out, "✗ Could not open {}: {}", platform, e)?;
            }
        }
    }
    Ok(())
}

/// Builds links for the given categories, or for every operation when none
/// are named.
pub fn run<W: Write>(
    app: &mut App,
    identity: &DoctorIdentity,
    categories: &[Category],
    open: bool,
    export: Option<ExportFormat>,
    out: &mut W,
) -> anyhow::Result<()> {
    let everything = categories.is_empty();
    let selected: Vec<Category> = if everything {
        Category::ALL.to_vec()
    } else {
        categories.to_vec()
    };

    if everything {
        let entry = app.contact_search(identity);
        print_section(out, "Contact Search", std::slice::from_ref(&entry))?;
        remember(
            app,
            HistoryEntry::new(CONTACT_SEARCH_KEY)
                .with_identity(identity)
                .with_url(&entry.url),
            out,
        )?;

        match app.board_lookup(&identity.state) {
            Ok(board) => {
                let entry = ResultEntry::new(MEDICAL_BOARD_KEY, board.name, board.url);
                print_section(out, "Medical Board Lookup", std::slice::from_ref(&entry))?;
                remember(
                    app,
                    HistoryEntry::new(MEDICAL_BOARD_KEY)
                        .with_state(board.code)
                        .with_url(board.url),
                    out,
                )?;
            }
            Err(e) => {
                writeln!(out)?;
                writeln!(out, "⚠ Skipping medical board lookup: {}", e)?;
            }
        }
    }

    for category in selected {
        let entries = app.category_search(identity, category);
        print_section(out, category.title(), &entries)?;
        remember(
            app,
            HistoryEntry::new(category.key())
                .with_identity(identity)
                .with_entries(&entries),
            out,
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "✓ {} categories, {} links",
        app.results.category_count(),
        app.results.total_entries()
    )?;

    if open {
        open_recorded(app, out)?;
    }
    if let Some(format) = export {
        let path = doctordork_export::export_results(&app.paths, format, identity, &app.results)?;
        writeln!(out, "✓ Results exported to: {}", path.display())?;
    }
    Ok(())
}

/// Prints the Google contact-page dork and its URL.
pub fn contact<W: Write>(app: &mut App, identity: &DoctorIdentity, open: bool, out: &mut W) -> anyhow::Result<()> {
    let entry = app.contact_search(identity);
    writeln!(out, "Query: {}", doctordork_search::contact_dork(identity))?;
    writeln!(out, "URL:   {}", entry.url)?;
    remember(
        app,
        HistoryEntry::new(CONTACT_SEARCH_KEY)
            .with_identity(identity)
            .with_url(&entry.url),
        out,
    )?;
    if open {
        open_recorded(app, out)?;
    }
    Ok(())
}

/// Lists every category with its platforms.
pub fn categories<W: Write>(out: &mut W) -> anyhow::Result<()> {
    writeln!(out)?;
    writeln!(out, "🔎 Search categories")?;
    writeln!(out)?;
    writeln!(out, "  {:<24} {}", CONTACT_SEARCH_KEY, "Google contact-page search (1 link)")?;
    writeln!(
        out,
        "  {:<24} {}",
        MEDICAL_BOARD_KEY,
        format!("State medical board ({} jurisdictions)", doctordork_search::jurisdiction::count())
    )?;
    for category in Category::ALL {
        let names: Vec<&str> = category.templates().iter().map(|t| t.name).collect();
        writeln!(
            out,
            "  {:<24} {} ({} links)",
            category.key(),
            category.title(),
            names.len()
        )?;
        writeln!(out, "  {:<24}   {}", "", names.join(", "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::{john_smith, temp_app};

    #[test]
    fn test_named_categories_only() {
        let (_temp_dir, mut app, opener) = temp_app();
        let mut out = Vec::new();
        run(&mut app, &john_smith(), &[Category::Reviews, Category::Publications], false, None, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("== Review Aggregation (5) =="));
        assert!(!text.contains("Contact Search"));
        assert_eq!(app.results.category_count(), 2);
        assert_eq!(app.history.len(), 2);
        assert!(opener.urls().is_empty());
    }

    #[test]
    fn test_no_categories_runs_everything_and_exports() {
        let (temp_dir, mut app, opener) = temp_app();
        let mut out = Vec::new();
        run(&mut app, &john_smith(), &[], true, Some(ExportFormat::Csv), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(app.results.category_count(), 13);
        assert_eq!(opener.urls().len(), app.results.total_entries());
        assert!(text.contains("Results exported to:"));

        let csv = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .find(|e| e.file_name().to_string_lossy().ends_with(".csv"))
            .unwrap();
        let content = std::fs::read_to_string(csv.path()).unwrap();
        assert_eq!(content.lines().count(), app.results.total_entries() + 1);
    }

    #[test]
    fn test_unknown_state_skips_board_only() {
        let (_temp_dir, mut app, _) = temp_app();
        let id = DoctorIdentity::new("Jane Doe", "Toronto", "ON", "");
        let mut out = Vec::new();
        run(&mut app, &id, &[], false, None, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Skipping medical board lookup"));
        assert_eq!(app.results.category_count(), 12);
    }

    #[test]
    fn test_contact_prints_query_and_url() {
        let (_temp_dir, mut app, opener) = temp_app();
        let mut out = Vec::new();
        contact(&mut app, &john_smith(), true, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Query: (group:doctor OR group:physician)"));
        assert!(text.contains("URL:   https://www.google.com/search?q="));
        assert_eq!(opener.urls().len(), 1);
        assert_eq!(app.history.entries()[0].kind, CONTACT_SEARCH_KEY);
    }

    #[test]
    fn test_categories_listing() {
        let mut out = Vec::new();
        categories(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        for category in Category::ALL {
            assert!(text.contains(category.key()));
        }
        assert!(text.contains("PubMed"));
    }
}
