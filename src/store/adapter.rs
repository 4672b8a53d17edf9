// Persistent store adapters for the durable cache tier.
// A named JSON value per resource key; serialization format and capacity are
// the adapter's concern, not the cache's.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use serde_json::Value;

use crate::error::{Result, StockroomError};

/// Named key/value storage for serialized snapshots.
///
/// Implementations must tolerate values holding on the order of 10,000
/// small records.
pub trait StorageAdapter: Send + Sync {
    /// Read the value stored under `name`, if any.
    fn get(&self, name: &str) -> Result<Option<Value>>;

    /// Store `value` under `name`, replacing any previous value.
    fn set(&self, name: &str, value: &Value) -> Result<()>;

    /// Remove the value stored under `name`.
    fn remove(&self, name: &str) -> Result<()>;
}

/// Filesystem-backed adapter writing one JSON file per name.
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the platform cache directory.
    pub fn new() -> Result<Self> {
        let base_dir = super::paths::cache_dir()
            .ok_or_else(|| StockroomError::Other("no cache directory available".to_string()))?;
        Ok(Self { base_dir })
    }

    /// Create a store rooted at an explicit directory.
    pub fn with_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.base_dir
            .join(format!("{}.json", super::paths::sanitize_name(name)))
    }
}

impl StorageAdapter for FileStore {
    fn get(&self, name: &str) -> Result<Option<Value>> {
        let path = self.path_for(name);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        let value = serde_json::from_str(&contents)?;
        Ok(Some(value))
    }

    fn set(&self, name: &str, value: &Value) -> Result<()> {
        let path = self.path_for(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string(value)?;

        // Write atomically via temp file
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    fn remove(&self, name: &str) -> Result<()> {
        let path = self.path_for(name);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-memory adapter for tests and sessions without durable storage.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageAdapter for MemoryStore {
    fn get(&self, name: &str) -> Result<Option<Value>> {
        Ok(self.values.lock().unwrap().get(name).cloned())
    }

    fn set(&self, name: &str, value: &Value) -> Result<()> {
        self.values
            .lock()
            .unwrap()
            .insert(name.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<()> {
        self.values.lock().unwrap().remove(name);
        Ok(())
    }
}
