use chrono::Local;
use doctordork_core::{DoctorIdentity, Paths, ResultEntry, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Most entries kept on disk; older ones are dropped on append.
pub const MAX_HISTORY: usize = 100;
/// How many entries the history view shows by default.
pub const DEFAULT_RECENT: usize = 20;

/// One past operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Platform name to URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub timestamp: String,
}

impl HistoryEntry {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            doctor_name: None,
            city: None,
            state: None,
            specialty: None,
            url: None,
            urls: None,
            timestamp: String::new(),
        }
    }

    pub fn with_identity(mut self, identity: &DoctorIdentity) -> Self {
        self.doctor_name = Some(identity.doctor_name.clone());
        self.city = Some(identity.city.clone());
        self.state = Some(identity.state.clone());
        self.specialty = Some(identity.specialty.clone());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_entries(mut self, entries: &[ResultEntry]) -> Self {
        let urls = entries
            .iter()
            .map(|e| (e.platform.clone(), e.url.clone()))
            .collect();
        self.urls = Some(urls);
        self
    }
}

/// Bounded search log persisted as a single JSON array.
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Opens the history file. A missing or unreadable file starts empty.
    pub fn open(paths: &Paths) -> Self {
        let path = paths.history_file();
        let entries = if path.exists() {
            match Self::load(&path) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "Ignoring unreadable history file");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };
        debug!(count = entries.len(), "Loaded search history");
        Self { path, entries }
    }

    pub fn load(path: &Path) -> Result<Vec<HistoryEntry>> {
        let content = std::fs::read_to_string(path)?;
        let entries: Vec<HistoryEntry> = serde_json::from_str(&content)?;
        Ok(entries)
    }

    /// Stamps and appends `entry`, trims to [`MAX_HISTORY`] and rewrites the
    /// file.
    pub fn append(&mut self, mut entry: HistoryEntry) -> Result<()> {
        entry.timestamp = Local::now().to_rfc3339();
        self.entries.push(entry);
        if self.entries.len() > MAX_HISTORY {
            let excess = self.entries.len() - MAX_HISTORY;
            self.entries.drain(..excess);
        }
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// The last `n` entries, newest first.
    pub fn recent(&self, n: usize) -> Vec<&HistoryEntry> {
        self.entries.iter().rev().take(n).collect()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, HistoryStore) {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_base(temp_dir.path().to_path_buf());
        let store = HistoryStore::open(&paths);
        (temp_dir, store)
    }

    #[test]
    fn test_append_persists_immediately() {
        let (temp_dir, mut store) = store();
        let id = DoctorIdentity::new("John Smith", "Boston", "MA", "");
        store
            .append(HistoryEntry::new("contact_search").with_identity(&id).with_url("https://g.co"))
            .unwrap();

        let on_disk = HistoryStore::load(store.path()).unwrap();
        assert_eq!(on_disk.len(), 1);
        assert_eq!(on_disk[0].kind, "contact_search");
        assert_eq!(on_disk[0].doctor_name.as_deref(), Some("John Smith"));
        assert!(!on_disk[0].timestamp.is_empty());

        let reopened = HistoryStore::open(&Paths::with_base(temp_dir.path().to_path_buf()));
        assert_eq!(reopened.len(), 1);
    }

    #[test]
    fn test_never_exceeds_cap() {
        let (_temp_dir, mut store) = store();
        for i in 0..(MAX_HISTORY + 37) {
            store.append(HistoryEntry::new(format!("op_{}", i))).unwrap();
            assert!(store.len() <= MAX_HISTORY);
        }
        assert_eq!(store.len(), MAX_HISTORY);
        assert_eq!(store.entries()[0].kind, "op_37");
        assert_eq!(HistoryStore::load(store.path()).unwrap().len(), MAX_HISTORY);
    }

    #[test]
    fn test_recent_is_newest_first() {
        let (_temp_dir, mut store) = store();
        for i in 0..30 {
            store.append(HistoryEntry::new(format!("op_{}", i))).unwrap();
        }
        let recent = store.recent(DEFAULT_RECENT);
        assert_eq!(recent.len(), DEFAULT_RECENT);
        assert_eq!(recent[0].kind, "op_29");
        assert_eq!(recent[19].kind, "op_10");
        assert_eq!(store.recent(100).len(), 30);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_base(temp_dir.path().to_path_buf());
        std::fs::write(paths.history_file(), "[{ broken").unwrap();
        let store = HistoryStore::open(&paths);
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_removes_file() {
        let (_temp_dir, mut store) = store();
        store.append(HistoryEntry::new("ethics_report").with_state("CA")).unwrap();
        assert!(store.path().exists());
        store.clear().unwrap();
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_entries_become_platform_map() {
        let entries = vec![
            ResultEntry::new("publication_search", "PubMed", "https://pubmed/1"),
            ResultEntry::new("publication_search", "Google Scholar", "https://scholar/1"),
        ];
        let entry = HistoryEntry::new("publication_search").with_entries(&entries);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "publication_search");
        assert_eq!(json["urls"]["PubMed"], "https://pubmed/1");
        assert!(json.get("url").is_none());
    }

    #[test]
    fn test_reads_entries_written_by_older_versions() {
        let raw = r#"[{"type": "review_aggregation", "doctor_name": "A", "city": "B",
                       "state": "CA", "specialty": "", "urls": {"Google": "x"},
                       "timestamp": "2024-01-01T10:00:00.000000"}]"#;
        let entries: Vec<HistoryEntry> = serde_json::from_str(raw).unwrap();
        assert_eq!(entries[0].urls.as_ref().unwrap()["Google"], "x");
    }
}
