use std::{
    collections::HashMap,
    fs,
    path::PathBuf,
};

use anyhow::{Context, Result};
use serde_json::{Map, Value};

/// Key under which the stream layout is persisted.
pub static STREAMS_KEY: &str = "strimly_streams";
/// Key under which the light/dark preference is persisted.
pub static THEME_KEY: &str = "strimly_theme";

pub static STORAGE_FILE: &str = "storage.json";

/// String key/value store that outlives the process.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// A JSON object on disk, rewritten after every change.
pub struct FileStorage {
    path: PathBuf,
    contents: Map<String, Value>,
}

impl FileStorage {
    /// Opens the store at `path`. A missing file is an empty store; a file that
    /// is not a JSON object is logged and replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Value>(&raw) {
                Ok(Value::Object(contents)) => contents,
                Ok(_) | Err(_) => {
                    log::warn!("storage file {} is not a JSON object, starting empty", path.display());
                    Map::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(err) => {
                return Err(err).with_context(|| format!("failed reading storage at {}", path.display()));
            }
        };
        log::info!("using storage: {}", path.display());
        Ok(Self { path, contents })
    }

    fn write_file(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed creating storage directory {}", parent.display()))?;
        }
        let payload = serde_json::to_string_pretty(&self.contents).context("failed serializing storage")?;
        fs::write(&self.path, payload).with_context(|| format!("failed writing storage at {}", self.path.display()))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.contents.get(key).and_then(Value::as_str).map(str::to_string)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.contents.insert(key.to_string(), Value::String(value.to_string()));
        self.write_file()
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{FileStorage, MemoryStorage, Storage, STREAMS_KEY};

    #[test]
    fn file_storage_survives_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get(STREAMS_KEY), None);
        storage.set(STREAMS_KEY, "[]").unwrap();
        storage.set("other", "value").unwrap();
        storage.set("other", "replaced").unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get(STREAMS_KEY).as_deref(), Some("[]"));
        assert_eq!(reopened.get("other").as_deref(), Some("replaced"));
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "[1, 2").unwrap();

        let mut storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get(STREAMS_KEY), None);
        storage.set(STREAMS_KEY, "[]").unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains(STREAMS_KEY));
    }

    #[test]
    fn memory_storage_round_trips() {
        let mut storage = MemoryStorage::new();
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").as_deref(), Some("v"));
        assert_eq!(storage.get("missing"), None);
    }
}
