//! Local key/value adapters for the client layer.
//!
//! [`MemoryLocalStore`] keeps values for the lifetime of the process.
//! [`DirLocalStore`] writes one JSON document per key inside a directory
//! opened through `cap_std`, so keys can never escape that directory.

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use cap_std::{ambient_authority, fs::Dir};

use crate::client::{LocalStore, LocalStoreError};

/// Process-local store backed by a map.
#[derive(Debug, Default)]
pub struct MemoryLocalStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryLocalStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned(key: &str) -> String {
        format!("local store lock poisoned while accessing {key}")
    }
}

impl LocalStore for MemoryLocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, LocalStoreError> {
        let values = self
            .values
            .lock()
            .map_err(|_| LocalStoreError::read(key, Self::poisoned(key)))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LocalStoreError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| LocalStoreError::write(key, Self::poisoned(key)))?;
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), LocalStoreError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| LocalStoreError::write(key, Self::poisoned(key)))?;
        values.remove(key);
        Ok(())
    }
}

/// Directory-backed store: key `k` lives in `k.json`.
#[derive(Debug)]
pub struct DirLocalStore {
    dir: Dir,
}

impl DirLocalStore {
    /// Open (creating if needed) the directory at `path`.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        Dir::create_ambient_dir_all(path, ambient_authority())?;
        Dir::open_ambient_dir(path, ambient_authority()).map(Self::from_dir)
    }

    /// Wrap an already opened directory.
    pub fn from_dir(dir: Dir) -> Self {
        Self { dir }
    }

    fn file_name(key: &str) -> Result<String, String> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if valid {
            Ok(format!("{key}.json"))
        } else {
            Err("keys may only contain ASCII letters, digits, '_' or '-'".to_owned())
        }
    }
}

impl LocalStore for DirLocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, LocalStoreError> {
        let name = Self::file_name(key).map_err(|message| LocalStoreError::read(key, message))?;
        match self.dir.read_to_string(&name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(LocalStoreError::read(key, err.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LocalStoreError> {
        let name = Self::file_name(key).map_err(|message| LocalStoreError::write(key, message))?;
        self.dir
            .write(&name, value.as_bytes())
            .map_err(|err| LocalStoreError::write(key, err.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), LocalStoreError> {
        let name = Self::file_name(key).map_err(|message| LocalStoreError::write(key, message))?;
        match self.dir.remove_file(&name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(LocalStoreError::write(key, err.to_string())),
        }
    }
}
