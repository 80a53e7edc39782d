use std::path::PathBuf;

use doctordork_core::{Config, DoctorIdentity, Paths, Result, ResultEntry};
use doctordork_search::{jurisdiction, Category, Jurisdiction, SessionResults, MEDICAL_BOARD_KEY};
use doctordork_storage::{HistoryEntry, HistoryStore};
use tracing::debug;

use crate::browser::UrlOpener;

/// State shared by every command for one process run.
pub struct App {
    pub paths: Paths,
    pub config: Config,
    pub history: HistoryStore,
    pub results: SessionResults,
    opener: Box<dyn UrlOpener>,
}

impl App {
    pub fn new(paths: Paths, opener: Box<dyn UrlOpener>) -> Self {
        let config = Config::load_or_default(&paths);
        let history = HistoryStore::open(&paths);
        debug!(base = %paths.base.display(), export_dir = %paths.export_dir.display(), "Application state ready");
        Self {
            paths,
            config,
            history,
            results: SessionResults::new(),
            opener,
        }
    }

    pub fn contact_search(&mut self, identity: &DoctorIdentity) -> ResultEntry {
        let entry = doctordork_search::build_contact_search(identity);
        self.results
            .record(doctordork_search::CONTACT_SEARCH_KEY, vec![entry.clone()]);
        entry
    }

    pub fn category_search(&mut self, identity: &DoctorIdentity, category: Category) -> Vec<ResultEntry> {
        let entries = doctordork_search::build_category(identity, category);
        self.results.record(category.key(), entries.clone());
        entries
    }

    /// Resolves `code` and records the board link for this run.
    pub fn board_lookup(&mut self, code: &str) -> Result<&'static Jurisdiction> {
        let board = jurisdiction::lookup(code)?;
        self.results.record(
            MEDICAL_BOARD_KEY,
            vec![ResultEntry::new(MEDICAL_BOARD_KEY, board.name, board.url)],
        );
        Ok(board)
    }

    /// Appends to the history file unless history is switched off.
    pub fn remember(&mut self, entry: HistoryEntry) -> Result<()> {
        if !self.config.save_history {
            debug!(kind = %entry.kind, "History disabled, not recording");
            return Ok(());
        }
        self.history.append(entry)
    }

    pub fn open(&mut self, url: &str) -> Result<()> {
        self.opener.open(url)
    }

    pub fn export_results(&self, identity: &DoctorIdentity) -> Result<PathBuf> {
        doctordork_export::export_results(&self.paths, self.config.export_format, identity, &self.results)
    }

    pub fn export_batch(&self, doctors: &[DoctorIdentity]) -> Result<PathBuf> {
        doctordork_export::export_batch(&self.paths, self.config.export_format, doctors)
    }

    pub fn save_config(&self) -> Result<()> {
        self.config.save(&self.paths.config_file())
    }

    pub fn reset_config(&mut self) -> Result<()> {
        self.config = Config::default();
        self.save_config()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::browser::testing::RecordingOpener;
    use tempfile::TempDir;

    /// An app rooted in a fresh temp dir with a recording opener.
    pub fn temp_app() -> (TempDir, App, RecordingOpener) {
        let temp_dir = TempDir::new().unwrap();
        let opener = RecordingOpener::default();
        let app = App::new(
            Paths::with_base(temp_dir.path().to_path_buf()),
            Box::new(opener.clone()),
        );
        (temp_dir, app, opener)
    }

    pub fn john_smith() -> DoctorIdentity {
        DoctorIdentity::new("John Smith", "Boston", "MA", "Cardiology")
    }
}
