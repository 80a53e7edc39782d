pub mod csv_report;
pub mod html_report;
pub mod json_report;

use chrono::{DateTime, Local};
use doctordork_core::{DoctorIdentity, ExportFormat, Paths, Result};
use doctordork_search::SessionResults;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub use json_report::{BatchReport, JsonReport};

const RESULTS_PREFIX: &str = "doctordork_results";
const BATCH_PREFIX: &str = "doctordork_batch";

pub fn results_file_name(format: ExportFormat, at: &DateTime<Local>) -> String {
    file_name(RESULTS_PREFIX, format, at)
}

pub fn batch_file_name(format: ExportFormat, at: &DateTime<Local>) -> String {
    file_name(BATCH_PREFIX, format, at)
}

fn file_name(prefix: &str, format: ExportFormat, at: &DateTime<Local>) -> String {
    format!("{}_{}.{}", prefix, at.format("%Y%m%d_%H%M%S"), format.extension())
}

/// Writes the run's links to a timestamped file in the export directory and
/// returns its path.
pub fn export_results(
    paths: &Paths,
    format: ExportFormat,
    identity: &DoctorIdentity,
    results: &SessionResults,
) -> Result<PathBuf> {
    let now = Local::now();
    let path = paths.export_file(&results_file_name(format, &now));
    let mut out = create(&path)?;

    match format {
        ExportFormat::Csv => csv_report::write_results(&mut out, results)?,
        ExportFormat::Json => {
            let report = JsonReport::new(&now, identity, results);
            serde_json::to_writer_pretty(&mut out, &report)?;
        }
        ExportFormat::Html => {
            let html = html_report::render_results(identity, results, &now);
            out.write_all(html.as_bytes())?;
        }
    }
    out.flush()?;

    info!(path = %path.display(), format = %format, entries = results.total_entries(), "Exported results");
    Ok(path)
}

/// Writes the identities of a batch run to a timestamped file.
pub fn export_batch(paths: &Paths, format: ExportFormat, doctors: &[DoctorIdentity]) -> Result<PathBuf> {
    let now = Local::now();
    let path = paths.export_file(&batch_file_name(format, &now));
    let mut out = create(&path)?;

    match format {
        ExportFormat::Csv => csv_report::write_batch(&mut out, doctors)?,
        ExportFormat::Json => {
            let report = BatchReport::new(&now, doctors);
            serde_json::to_writer_pretty(&mut out, &report)?;
        }
        ExportFormat::Html => {
            let html = html_report::render_batch(doctors, &now);
            out.write_all(html.as_bytes())?;
        }
    }
    out.flush()?;

    info!(path = %path.display(), format = %format, doctors = doctors.len(), "Exported batch");
    Ok(path)
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}

/// "review_aggregation" -> "Review Aggregation".
pub fn category_title(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn sample() -> (DoctorIdentity, SessionResults) {
        let identity = DoctorIdentity::new("John Smith", "Boston", "MA", "Cardiology");
        let mut results = SessionResults::new();
        results.record(
            "review_aggregation",
            doctordork_search::build_category(&identity, doctordork_search::Category::Reviews),
        );
        results.record(
            "contact_search",
            vec![doctordork_search::build_contact_search(&identity)],
        );
        (identity, results)
    }

    #[test]
    fn test_file_names_carry_timestamp() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            results_file_name(ExportFormat::Html, &at),
            "doctordork_results_20240309_140507.html"
        );
        assert_eq!(
            batch_file_name(ExportFormat::Csv, &at),
            "doctordork_batch_20240309_140507.csv"
        );
    }

    #[test]
    fn test_export_each_format() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_base(temp_dir.path().to_path_buf());
        let (identity, results) = sample();

        for format in ExportFormat::ALL {
            let path = export_results(&paths, format, &identity, &results).unwrap();
            assert!(path.starts_with(temp_dir.path()));
            assert_eq!(path.extension().unwrap(), format.extension());
            let content = std::fs::read_to_string(&path).unwrap();
            assert!(content.contains("Healthgrades"), "{} export lacks entries", format);
        }
    }

    #[test]
    fn test_json_export_reparses_to_same_results() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_base(temp_dir.path().to_path_buf());
        let (identity, results) = sample();

        let path = export_results(&paths, ExportFormat::Json, &identity, &results).unwrap();
        let report: JsonReport = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(report.results, results);
        assert_eq!(report.doctor_info, identity);
    }

    #[test]
    fn test_batch_export() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_base(temp_dir.path().to_path_buf());
        let doctors = vec![
            DoctorIdentity::new("John Smith", "Boston", "MA", ""),
            DoctorIdentity::new("Jane Doe", "Austin", "TX", "Pediatrics"),
        ];

        let path = export_batch(&paths, ExportFormat::Json, &doctors).unwrap();
        let report: BatchReport = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(report.doctors, doctors);

        let path = export_batch(&paths, ExportFormat::Html, &doctors).unwrap();
        assert!(std::fs::read_to_string(path).unwrap().contains("Jane Doe"));
    }

    #[test]
    fn test_category_title() {
        assert_eq!(category_title("review_aggregation"), "Review Aggregation");
        assert_eq!(category_title("contact_search"), "Contact Search");
        assert_eq!(category_title("x"), "X");
    }

    #[test]
    fn test_unwritable_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let paths = Paths::with_base(temp_dir.path().to_path_buf()).with_export_dir(blocker);
        let (identity, results) = sample();
        assert!(export_results(&paths, ExportFormat::Csv, &identity, &results).is_err());
    }
}
