use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::paths::Paths;
use crate::types::ExportFormat;

/// Persisted user preferences.
///
/// Every field defaults on its own, so a file holding only some keys still
/// loads with the rest filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_true")]
    pub auto_open_browser: bool,
    #[serde(default)]
    pub export_format: ExportFormat,
    #[serde(default = "default_true")]
    pub save_history: bool,
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_open_browser: default_true(),
            export_format: ExportFormat::default(),
            save_history: default_true(),
            show_progress: default_true(),
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 4] = [
        "auto_open_browser",
        "export_format",
        "save_history",
        "show_progress",
    ];

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Loads the config file, falling back to defaults when it is missing
    /// or unreadable.
    pub fn load_or_default(paths: &Paths) -> Self {
        let config_path = paths.config_file();
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Self::default();
        }
        match Self::load(&config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, path = %config_path.display(), "Ignoring unreadable config file");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "auto_open_browser" => self.auto_open_browser.to_string(),
            "export_format" => self.export_format.to_string(),
            "save_history" => self.save_history.to_string(),
            "show_progress" => self.show_progress.to_string(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "auto_open_browser" => self.auto_open_browser = parse_bool(key, value)?,
            "export_format" => self.export_format = value.parse()?,
            "save_history" => self.save_history = parse_bool(key, value)?,
            "show_progress" => self.show_progress = parse_bool(key, value)?,
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> Error {
    Error::Config(format!(
        "Unknown config key '{}'. Options: {}",
        key,
        Config::KEYS.join(", ")
    ))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(Error::Config(format!(
            "Expected true/false for '{}', got '{}'",
            key, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_merges_with_defaults() {
        let raw = r#"{ "auto_open_browser": false, "export_format": "csv" }"#;
        let cfg: Config = serde_json::from_str(raw).unwrap();
        assert!(!cfg.auto_open_browser);
        assert_eq!(cfg.export_format, ExportFormat::Csv);
        assert!(cfg.save_history);
        assert!(cfg.show_progress);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_base(temp_dir.path().to_path_buf());
        assert_eq!(Config::load_or_default(&paths), Config::default());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_base(temp_dir.path().to_path_buf());
        std::fs::write(paths.config_file(), "{ not json").unwrap();
        assert_eq!(Config::load_or_default(&paths), Config::default());

        std::fs::write(paths.config_file(), r#"{"export_format": "pdf"}"#).unwrap();
        assert_eq!(Config::load_or_default(&paths), Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_base(temp_dir.path().join("nested"));
        let mut cfg = Config::default();
        cfg.save_history = false;
        cfg.export_format = ExportFormat::Json;
        cfg.save(&paths.config_file()).unwrap();

        assert_eq!(Config::load_or_default(&paths), cfg);
    }

    #[test]
    fn test_get_and_set_by_key() {
        let mut cfg = Config::default();
        cfg.set("auto_open_browser", "off").unwrap();
        cfg.set("export_format", "JSON").unwrap();
        assert_eq!(cfg.get("auto_open_browser").unwrap(), "false");
        assert_eq!(cfg.get("export_format").unwrap(), "json");

        assert!(cfg.set("show_progress", "maybe").is_err());
        assert!(cfg.set("colour", "true").is_err());
        assert!(cfg.get("colour").is_err());
    }
}
