//! Record Store
//!
//! Narrow read/write interface over the single persisted [`DailyRecord`],
//! so any durable key-value medium can back the quota tracker without
//! touching its logic. The default medium is one JSON file on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use super::error::StoreError;
use super::record::DailyRecord;

/// Durable storage for the single daily usage record
///
/// `load` never fails for read-side problems: a missing, unreadable, or
/// corrupt record is reported as `None` and the caller starts fresh.
pub trait RecordStore: Send + Sync {
    /// Load the persisted record, if a parseable one exists
    fn load(&self) -> Option<DailyRecord>;

    /// Persist the record, replacing whatever was stored before
    fn save(&self, record: &DailyRecord) -> Result<(), StoreError>;
}

/// File-backed store holding one JSON-serialized record
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file path
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self) -> Option<DailyRecord> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No daily record at {:?}, starting fresh", self.path);
                return None;
            }
            Err(err) => {
                warn!("Failed to read daily record from {:?}: {}", self.path, err);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(
                    "Corrupt daily record at {:?} ({}), treating as absent",
                    self.path, err
                );
                None
            }
        }
    }

    fn save(&self, record: &DailyRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(record)?;
        fs::write(&self.path, json)?;
        debug!("Saved daily record to {:?}: {:?}", self.path, record);
        Ok(())
    }
}

/// In-memory store for tests and non-durable sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: Mutex<Option<DailyRecord>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a record
    pub fn with_record(record: DailyRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Option<DailyRecord> {
        self.record.lock().unwrap().clone()
    }

    fn save(&self, record: &DailyRecord) -> Result<(), StoreError> {
        *self.record.lock().unwrap() = Some(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(date: &str, count: u32) -> DailyRecord {
        DailyRecord {
            date: date.to_string(),
            count,
        }
    }

    #[test]
    fn test_file_store_missing_file_loads_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("daily-generations.json"));
        assert!(store.load().is_none());
    }

    #[test]
    fn test_file_store_save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("daily-generations.json"));

        let saved = record("2026-08-25", 2);
        store.save(&saved).unwrap();

        assert_eq!(store.load(), Some(saved));
    }

    #[test]
    fn test_file_store_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("state").join("record.json"));

        store.save(&record("2026-08-25", 1)).unwrap();
        assert!(store.load().is_some());
    }

    #[test]
    fn test_file_store_corrupt_content_loads_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("daily-generations.json");
        fs::write(&path, "{not json at all").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.load().is_none());
    }

    #[test]
    fn test_file_store_wrong_shape_loads_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("daily-generations.json");
        fs::write(&path, r#"{"date":"2026-08-25","count":"three"}"#).unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.load().is_none());
    }

    #[test]
    fn test_file_store_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("daily-generations.json"));

        store.save(&record("2026-08-24", 3)).unwrap();
        store.save(&record("2026-08-25", 1)).unwrap();

        assert_eq!(store.load(), Some(record("2026-08-25", 1)));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load().is_none());

        store.save(&record("2026-08-25", 1)).unwrap();
        assert_eq!(store.load(), Some(record("2026-08-25", 1)));
    }

    #[test]
    fn test_memory_store_seeded() {
        let store = MemoryStore::with_record(record("2026-08-25", 3));
        assert_eq!(store.load().unwrap().count, 3);
    }
}
