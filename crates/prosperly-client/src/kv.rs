//! Key-value persistence shared by the transaction and settings stores.
//!
//! Values are whole JSON documents; callers always read, modify and rewrite
//! a complete value, never a fragment of one.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::state::ensure_home_directory;
use crate::{ClientError, ClientResult};

pub trait KeyValueStore {
    /// Returns `None` when nothing has been stored under `key` yet.
    fn get(&self, key: &str) -> ClientResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        (**self).set(key, value)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| ClientError::storage_unreadable(key, "in-memory store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| ClientError::storage_write_failed(key, "in-memory store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `dir`, creating the directory when missing.
    pub fn open(dir: &Path) -> ClientResult<Self> {
        ensure_home_directory(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => {
                debug!(key, path = %path.display(), bytes = contents.len(), "read stored record");
                Ok(Some(contents))
            }
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => {
                warn!(key, path = %path.display(), %error, "failed to read stored record");
                Err(ClientError::storage_unreadable(key, &error.to_string()))
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let path = self.path_for(key);
        let staging = self.dir.join(format!(".{key}.json.tmp"));

        let written = fs::write(&staging, value).and_then(|()| fs::rename(&staging, &path));
        if let Err(error) = written {
            warn!(key, path = %path.display(), %error, "failed to write stored record");
            let _ = fs::remove_file(&staging);
            return Err(ClientError::storage_write_failed(key, &error.to_string()));
        }

        debug!(key, path = %path.display(), bytes = value.len(), "wrote stored record");
        Ok(())
    }
}
