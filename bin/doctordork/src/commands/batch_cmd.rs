use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use anyhow::Context;
use doctordork_core::ExportFormat;
use doctordork_search::CONTACT_SEARCH_KEY;
use doctordork_storage::HistoryEntry;

use crate::app::App;
use crate::commands::search_cmd::remember;

/// Run a contact search for every doctor listed in `file`.
pub fn run<W: Write>(
    app: &mut App,
    file: &Path,
    export: Option<ExportFormat>,
    out: &mut W,
) -> anyhow::Result<()> {
    let reader = File::open(file)
        .with_context(|| format!("Cannot read batch file {}", file.display()))?;
    let (doctors, rejected) = doctordork_search::read_batch(BufReader::new(reader))?;

    for bad in &rejected {
        writeln!(out, "⚠ Line {}: {} ({})", bad.line_number, bad.error, bad.line)?;
    }
    if doctors.is_empty() {
        writeln!(out, "No doctors found in {}", file.display())?;
        return Ok(());
    }

    for (idx, doctor) in doctors.iter().enumerate() {
        let entry = app.contact_search(doctor);
        writeln!(out, "[{}/{}] {}", idx + 1, doctors.len(), doctor.doctor_name)?;
        writeln!(out, "      {}", entry.url)?;
        remember(
            app,
            HistoryEntry::new(CONTACT_SEARCH_KEY)
                .with_identity(doctor)
                .with_url(&entry.url),
            out,
        )?;
    }
    writeln!(
        out,
        "✓ Processed {} doctor(s), skipped {} line(s)",
        doctors.len(),
        rejected.len()
    )?;

    if let Some(format) = export {
        let path = doctordork_export::export_batch(&app.paths, format, &doctors)?;
        writeln!(out, "✓ Batch results exported to: {}", path.display())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::temp_app;

    #[test]
    fn test_batch_file_with_bad_lines() {
        let (temp_dir, mut app, _) = temp_app();
        let file = temp_dir.path().join("doctors.txt");
        std::fs::write(
            &file,
            "# clinic list\nJohn Smith, Boston, MA, Cardiology\nincomplete, line\n\nJane Doe, Austin, TX\n",
        )
        .unwrap();

        let mut out = Vec::new();
        run(&mut app, &file, Some(ExportFormat::Json), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("⚠ Line 3:"));
        assert!(text.contains("[2/2] Jane Doe"));
        assert!(text.contains("skipped 1 line(s)"));
        assert!(text.contains("Batch results exported to:"));
        assert_eq!(app.history.len(), 2);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let (temp_dir, mut app, _) = temp_app();
        let mut out = Vec::new();
        let err = run(&mut app, &temp_dir.path().join("nope.txt"), None, &mut out).unwrap_err();
        assert!(err.to_string().contains("Cannot read batch file"));
    }
}
