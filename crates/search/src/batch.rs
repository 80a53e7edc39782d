use std::io::BufRead;

use doctordork_core::{DoctorIdentity, Error, Result};
use tracing::warn;

pub const BATCH_FORMAT: &str = "Name, City, State, Specialty";

/// Parses one `Name, City, State[, Specialty]` line.
///
/// Fewer than three fields is rejected; anything after the fourth is ignored.
pub fn parse_batch_line(line: &str) -> Result<DoctorIdentity> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() < 3 {
        return Err(Error::Validation(format!(
            "Invalid format. Use: {}",
            BATCH_FORMAT
        )));
    }
    let specialty = parts.get(3).copied().unwrap_or("");
    Ok(DoctorIdentity::new(parts[0], parts[1], parts[2], specialty))
}

/// A rejected line from a batch file.
#[derive(Debug)]
pub struct BatchLineError {
    pub line_number: usize,
    pub line: String,
    pub error: Error,
}

/// Reads a whole batch file. Blank lines and `#` comments are skipped;
/// malformed lines are returned alongside the parsed identities.
pub fn read_batch<R: BufRead>(reader: R) -> Result<(Vec<DoctorIdentity>, Vec<BatchLineError>)> {
    let mut doctors = Vec::new();
    let mut rejected = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match parse_batch_line(trimmed) {
            Ok(identity) => doctors.push(identity),
            Err(error) => {
                warn!(line_number = idx + 1, line = %trimmed, "Skipping malformed batch line");
                rejected.push(BatchLineError {
                    line_number: idx + 1,
                    line: trimmed.to_string(),
                    error,
                });
            }
        }
    }

    Ok((doctors, rejected))
}
