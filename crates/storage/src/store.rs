//! Storage backends for ledger snapshots.

use crate::snapshot::LedgerSnapshot;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt state: {0}")]
    Corrupt(String),

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Somewhere a ledger snapshot can be written to and read back from.
pub trait StateStore: Send + Sync {
    /// Read the stored snapshot, `Ok(None)` when nothing has been saved.
    fn load(&self) -> Result<Option<LedgerSnapshot>>;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &LedgerSnapshot) -> Result<()>;
}

/// Snapshot kept in a single text file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StateStore for FileStore {
    fn load(&self) -> Result<Option<LedgerSnapshot>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        LedgerSnapshot::decode(&text).map(Some)
    }

    /// Writes beside the target and renames over it, so a crash mid-write
    /// leaves the previous snapshot intact.
    fn save(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        let text = snapshot.encode()?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.temp_path();
        fs::write(&tmp, text)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

/// In-memory snapshot holder (for testing). Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with raw text, as if a file with that content existed.
    pub fn with_contents(text: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(text.into()))),
        }
    }

    /// Raw encoded text currently stored.
    pub fn contents(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<LedgerSnapshot>> {
        let slot = self.slot.lock().map_err(|_| StorageError::Poisoned)?;
        slot.as_deref().map(LedgerSnapshot::decode).transpose()
    }

    fn save(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        let text = snapshot.encode()?;
        let mut slot = self.slot.lock().map_err(|_| StorageError::Poisoned)?;
        *slot = Some(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proofchain_core::{Block, Transaction};

    fn sample() -> LedgerSnapshot {
        LedgerSnapshot::new(
            vec![Block::genesis()],
            vec![Transaction::new("alice", "bob", "00", 1.0)],
        )
    }

    #[test]
    fn test_file_store_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("ledger.txt"));

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("ledger.txt"));

        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_file_store_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("ledger.txt"));

        store.save(&sample()).unwrap();
        let empty = LedgerSnapshot::new(vec![Block::genesis()], vec![]);
        store.save(&empty).unwrap();

        assert_eq!(store.load().unwrap(), Some(empty));
    }

    #[test]
    fn test_file_store_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.txt");
        // A non-empty directory at the target makes the rename fail.
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "").unwrap();
        let store = FileStore::new(&path);

        assert!(matches!(store.save(&sample()), Err(StorageError::Io(_))));
        assert!(!store.temp_path().exists());
        assert!(path.is_dir());
    }

    #[test]
    fn test_file_store_corrupt_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.txt");
        fs::write(&path, "not json at all").unwrap();

        assert!(FileStore::new(&path).load().is_err());
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.save(&sample()).unwrap();
        assert_eq!(other.load().unwrap(), Some(sample()));
        assert!(other.contents().unwrap().contains('\n'));
    }

    #[test]
    fn test_memory_store_with_contents() {
        let store = MemoryStore::with_contents("garbage");
        assert!(store.load().is_err());
    }
}
