//! Session history persistence module
//!
//! Handles saving, loading, and rotation of completed ATM receipts
//! and loan applications.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::models::HistoryEntry;
use crate::{FabError, Result, APP_NAME, HISTORY_FILE, MAX_HISTORY_ENTRIES};

/// Session history storage manager
#[derive(Debug)]
pub struct HistoryStore {
    history_path: PathBuf,
}

/// History file structure for JSON persistence
#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryFile {
    version: u32,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Create a store at the standard history file location
    pub fn new() -> Result<Self> {
        let history_path = Self::history_file_path()?;
        Ok(Self { history_path })
    }

    /// Create a store at an explicit path
    pub fn with_path(history_path: PathBuf) -> Self {
        Self { history_path }
    }

    /// Get the standard history file path
    /// Uses $DATA_HOME/fabank/history.json or the platform equivalent
    pub fn history_file_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            FabError::PersistenceError("Unable to determine data directory".to_string())
        })?;

        Ok(data_dir.join(APP_NAME).join(HISTORY_FILE))
    }

    /// Load all entries from the history file
    pub fn load_entries(&self) -> Result<Vec<HistoryEntry>> {
        if !self.history_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.history_path).map_err(|e| {
            FabError::PersistenceError(format!(
                "Failed to read history file {}: {}",
                self.history_path.display(),
                e
            ))
        })?;

        let history_file: HistoryFile = serde_json::from_str(&content).map_err(|e| {
            FabError::PersistenceError(format!(
                "Failed to parse history file {}: {}",
                self.history_path.display(),
                e
            ))
        })?;

        Ok(history_file.entries)
    }

    /// Append a new entry to the history file
    /// Rotates old entries once the file exceeds MAX_HISTORY_ENTRIES
    pub fn append_entry(&self, entry: HistoryEntry) -> Result<()> {
        let mut entries = self.load_entries()?;

        entries.push(entry);

        if entries.len() > MAX_HISTORY_ENTRIES {
            let skip_count = entries.len() - MAX_HISTORY_ENTRIES;
            entries = entries.into_iter().skip(skip_count).collect();
        }

        self.save_entries(entries)
    }

    /// Save all entries to the history file
    fn save_entries(&self, entries: Vec<HistoryEntry>) -> Result<()> {
        if let Some(parent) = self.history_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                FabError::PersistenceError(format!(
                    "Failed to create history directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let history_file = HistoryFile {
            version: 1,
            entries,
        };

        let content = serde_json::to_string_pretty(&history_file).map_err(|e| {
            FabError::PersistenceError(format!("Failed to serialize history: {}", e))
        })?;

        fs::write(&self.history_path, content).map_err(|e| {
            FabError::PersistenceError(format!(
                "Failed to write history file {}: {}",
                self.history_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the number of stored entries
    pub fn count_entries(&self) -> Result<usize> {
        Ok(self.load_entries()?.len())
    }

    /// Get the most recent N entries
    pub fn recent_entries(&self, count: usize) -> Result<Vec<HistoryEntry>> {
        let entries = self.load_entries()?;

        if entries.len() <= count {
            Ok(entries)
        } else {
            let skip_count = entries.len() - count;
            Ok(entries.into_iter().skip(skip_count).collect())
        }
    }

    /// Clear all stored entries
    pub fn clear_entries(&self) -> Result<()> {
        if self.history_path.exists() {
            fs::remove_file(&self.history_path).map_err(|e| {
                FabError::PersistenceError(format!(
                    "Failed to remove history file {}: {}",
                    self.history_path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Get the history file path for external access
    pub fn path(&self) -> &PathBuf {
        &self.history_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionReceipt, TxKind};
    use chrono::Utc;

    fn sample_entry(amount: f64) -> HistoryEntry {
        HistoryEntry::Transaction(TransactionReceipt::new(
            Utc::now(),
            TxKind::Deposit,
            amount,
            amount + 100.0,
        ))
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = HistoryStore::with_path(dir.path().join("history.json"));
        assert!(store.load_entries().expect("load").is_empty());
    }

    #[test]
    fn test_append_and_reload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = HistoryStore::with_path(dir.path().join("history.json"));

        store.append_entry(sample_entry(10.0)).expect("append");
        store.append_entry(sample_entry(20.0)).expect("append");

        let entries = store.load_entries().expect("load");
        assert_eq!(entries.len(), 2);
        assert_eq!(store.count_entries().expect("count"), 2);
    }

    #[test]
    fn test_rotation_caps_history() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = HistoryStore::with_path(dir.path().join("history.json"));

        for i in 0..(MAX_HISTORY_ENTRIES + 5) {
            store.append_entry(sample_entry(i as f64)).expect("append");
        }

        let entries = store.load_entries().expect("load");
        assert_eq!(entries.len(), MAX_HISTORY_ENTRIES);

        // Oldest entries were rotated out
        match &entries[0] {
            HistoryEntry::Transaction(receipt) => assert_eq!(receipt.amount, 5.0),
            other => panic!("unexpected entry: {:?}", other),
        }
    }

    #[test]
    fn test_recent_entries_and_clear() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = HistoryStore::with_path(dir.path().join("history.json"));

        for i in 0..10 {
            store.append_entry(sample_entry(i as f64)).expect("append");
        }

        let recent = store.recent_entries(3).expect("recent");
        assert_eq!(recent.len(), 3);
        match &recent[2] {
            HistoryEntry::Transaction(receipt) => assert_eq!(receipt.amount, 9.0),
            other => panic!("unexpected entry: {:?}", other),
        }

        store.clear_entries().expect("clear");
        assert_eq!(store.count_entries().expect("count"), 0);
    }
}
