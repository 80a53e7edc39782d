use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The identity fields a search is built from.
///
/// All fields are free text. `state` is trimmed and upper-cased on
/// construction but otherwise unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorIdentity {
    #[serde(default)]
    pub doctor_name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub specialty: String,
}

impl DoctorIdentity {
    pub fn new(
        doctor_name: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        specialty: impl Into<String>,
    ) -> Self {
        Self {
            doctor_name: doctor_name.into().trim().to_string(),
            city: city.into().trim().to_string(),
            state: state.into().trim().to_uppercase(),
            specialty: specialty.into().trim().to_string(),
        }
    }

    /// First and last name for registry-style lookups.
    ///
    /// A leading "Dr"/"Dr." is dropped. One remaining token fills both slots.
    pub fn name_parts(&self) -> (String, String) {
        let mut tokens: Vec<&str> = self.doctor_name.split_whitespace().collect();
        if tokens.len() > 1 && is_honorific(tokens[0]) {
            tokens.remove(0);
        }
        match tokens.as_slice() {
            [] => (String::new(), String::new()),
            [only] => (only.to_string(), only.to_string()),
            [first, .., last] => (first.to_string(), last.to_string()),
        }
    }
}

fn is_honorific(token: &str) -> bool {
    let token = token.trim_end_matches('.');
    token.eq_ignore_ascii_case("dr")
}

/// One generated link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub category: String,
    pub platform: String,
    pub url: String,
}

impl ResultEntry {
    pub fn new(
        category: impl Into<String>,
        platform: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            platform: platform.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
    #[default]
    Html,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Json, ExportFormat::Html];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Html => "html",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "html" => Ok(ExportFormat::Html),
            other => Err(Error::Validation(format!(
                "Unknown export format '{}'. Options: csv, json, html",
                other
            ))),
        }
    }
}
