use std::path::PathBuf;

const CONFIG_FILE_NAME: &str = ".doctordork_config.json";
const HISTORY_FILE_NAME: &str = ".doctordork_history.json";

/// Locations of the files the tool persists between runs.
///
/// Both files live directly in the user's home directory. `export_dir` is
/// where reports are written and defaults to the working directory.
#[derive(Debug, Clone)]
pub struct Paths {
    pub base: PathBuf,
    pub export_dir: PathBuf,
}

impl Paths {
    pub fn new() -> Self {
        let base = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            base,
            export_dir: PathBuf::from("."),
        }
    }

    pub fn with_base(base: PathBuf) -> Self {
        Self {
            export_dir: base.clone(),
            base,
        }
    }

    pub fn with_export_dir(mut self, export_dir: PathBuf) -> Self {
        self.export_dir = export_dir;
        self
    }

    pub fn config_file(&self) -> PathBuf {
        self.base.join(CONFIG_FILE_NAME)
    }

    pub fn history_file(&self) -> PathBuf {
        self.base.join(HISTORY_FILE_NAME)
    }

    pub fn export_file(&self, file_name: &str) -> PathBuf {
        self.export_dir.join(file_name)
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_in_base() {
        let paths = Paths::with_base(PathBuf::from("/tmp/dd-home"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/dd-home/.doctordork_config.json"));
        assert_eq!(paths.history_file(), PathBuf::from("/tmp/dd-home/.doctordork_history.json"));
    }

    #[test]
    fn test_export_dir_override() {
        let paths = Paths::with_base(PathBuf::from("/tmp/dd-home"))
            .with_export_dir(PathBuf::from("/tmp/reports"));
        assert_eq!(
            paths.export_file("out.csv"),
            PathBuf::from("/tmp/reports/out.csv")
        );
    }
}
