use std::io::Write;

use doctordork_core::{DoctorIdentity, Error, Result};
use doctordork_search::SessionResults;

/// One row per generated link: category, platform, URL.
pub fn write_results<W: Write>(out: W, results: &SessionResults) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["Category", "Platform/Board", "URL"])
        .map_err(|e| Error::Export(format!("CSV header write error: {}", e)))?;

    for entry in results.entries() {
        wtr.write_record([&entry.category, &entry.platform, &entry.url])
            .map_err(|e| Error::Export(format!("CSV row write error: {}", e)))?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_batch<W: Write>(out: W, doctors: &[DoctorIdentity]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["doctor_name", "city", "state", "specialty"])
        .map_err(|e| Error::Export(format!("CSV header write error: {}", e)))?;

    for doctor in doctors {
        wtr.write_record([&doctor.doctor_name, &doctor.city, &doctor.state, &doctor.specialty])
            .map_err(|e| Error::Export(format!("CSV row write error: {}", e)))?;
    }

    wtr.flush()?;
    Ok(())
}
