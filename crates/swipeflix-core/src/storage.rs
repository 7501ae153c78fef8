use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Byte-level key-value persistence for named JSON records.
pub trait RecordStorage: Send + Sync {
    /// `Ok(None)` when the record has never been written.
    fn load(&self, record: &str) -> Result<Option<Vec<u8>>, StorageError>;
    fn save(&self, record: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

impl<S: RecordStorage + ?Sized> RecordStorage for Arc<S> {
    fn load(&self, record: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).load(record)
    }

    fn save(&self, record: &str, bytes: &[u8]) -> Result<(), StorageError> {
        (**self).save(record, bytes)
    }
}

/// Decode a JSON list record; an unreadable or missing record is empty.
pub(crate) fn load_record<T: DeserializeOwned>(storage: &dyn RecordStorage, record: &str) -> Vec<T> {
    match storage.load(record) {
        Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
            Ok(items) => items,
            Err(e) => {
                warn!("Stored {} is unreadable ({}), starting empty", record, e);
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!("Failed to load {}: {}, starting empty", record, e);
            Vec::new()
        }
    }
}

pub(crate) fn save_record<T: Serialize>(storage: &dyn RecordStorage, record: &str, items: &[T]) {
    let result = serde_json::to_vec(items)
        .map_err(StorageError::from)
        .and_then(|bytes| storage.save(record, &bytes));
    if let Err(e) = result {
        warn!("Failed to persist {}: {}", record, e);
    }
}

/// One `<record>.json` file per record inside a directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: &Path) -> Self {
        Self { dir: dir.to_path_buf() }
    }

    pub fn record_path(&self, record: &str) -> PathBuf {
        self.dir.join(format!("{}.json", record))
    }
}

impl RecordStorage for FileStorage {
    fn load(&self, record: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.record_path(record);
        if !path.exists() {
            debug!("No stored record at {:?}", path);
            return Ok(None);
        }
        Ok(Some(std::fs::read(&path)?))
    }

    fn save(&self, record: &str, bytes: &[u8]) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.record_path(record);

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, bytes)?;
        std::fs::rename(&temp_path, &path)?;

        debug!("Saved {} ({} bytes) to {:?}", record, bytes.len(), path);
        Ok(())
    }
}

/// Process-local storage, used by tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    records: Mutex<HashMap<String, Vec<u8>>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(self, record: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.lock().insert(record.to_string(), bytes.into());
        self
    }

    /// Make every subsequent `save` fail with an I/O error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn raw(&self, record: &str) -> Option<Vec<u8>> {
        self.lock().get(record).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RecordStorage for MemoryStorage {
    fn load(&self, record: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.raw(record))
    }

    fn save(&self, record: &str, bytes: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "writes disabled",
            )));
        }
        self.lock().insert(record.to_string(), bytes.to_vec());
        Ok(())
    }
}
