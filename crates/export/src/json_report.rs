use chrono::{DateTime, Local};
use doctordork_core::DoctorIdentity;
use doctordork_search::SessionResults;
use serde::{Deserialize, Serialize};

/// `{timestamp, doctor_info, results}` document for a single-doctor run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonReport {
    pub timestamp: String,
    pub doctor_info: DoctorIdentity,
    pub results: SessionResults,
}

impl JsonReport {
    pub fn new(at: &DateTime<Local>, identity: &DoctorIdentity, results: &SessionResults) -> Self {
        Self {
            timestamp: at.to_rfc3339(),
            doctor_info: identity.clone(),
            results: results.clone(),
        }
    }
}

/// `{timestamp, doctors}` document for a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub timestamp: String,
    pub doctors: Vec<DoctorIdentity>,
}

impl BatchReport {
    pub fn new(at: &DateTime<Local>, doctors: &[DoctorIdentity]) -> Self {
        Self {
            timestamp: at.to_rfc3339(),
            doctors: doctors.to_vec(),
        }
    }
}
