pub mod history;

pub use history::{HistoryEntry, HistoryStore, DEFAULT_RECENT, MAX_HISTORY};
