//! Key-value storage collaborator
//!
//! Backends:
//! - `MemoryStore`: in-process map (tests, headless runs)
//! - `FileStore`: one JSON file per key in a directory (native)
//! - `LocalStorage`: browser LocalStorage (wasm32)

use std::collections::HashMap;

use crate::persistence::StorageError;

/// String key-value store
pub trait KeyValueStore {
    /// Stored value, or `None` if the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store; can be switched offline to simulate failures
#[derive(Debug, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    available: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
            available: true,
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When false every call fails with `StorageError::Unavailable`
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Raw write that bypasses availability (seeding test data)
    pub fn insert(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store {
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use super::KeyValueStore;
    use crate::persistence::StorageError;

    /// Directory of `<key>.json` files
    #[derive(Debug, Clone)]
    pub struct FileStore {
        dir: PathBuf,
    }

    impl FileStore {
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self { dir: dir.into() }
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }

        fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
            let valid = !key.is_empty()
                && key
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
            if !valid {
                return Err(StorageError::Backend(format!("invalid key {key:?}")));
            }
            Ok(self.dir.join(format!("{key}.json")))
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            match fs::read_to_string(self.path_for(key)?) {
                Ok(value) => Ok(Some(value)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            let path = self.path_for(key)?;
            fs::create_dir_all(&self.dir)?;
            // Write then rename so a crash never leaves a half-written record
            let tmp = path.with_extension("json.tmp");
            fs::write(&tmp, value)?;
            fs::rename(&tmp, &path)?;
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod local_storage {
    use super::KeyValueStore;
    use crate::persistence::StorageError;

    /// Browser LocalStorage
    #[derive(Debug, Clone, Default)]
    pub struct LocalStorage;

    impl LocalStorage {
        fn storage() -> Result<web_sys::Storage, StorageError> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
                .ok_or(StorageError::Unavailable)
        }
    }

    impl KeyValueStore for LocalStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Self::storage()?
                .get_item(key)
                .map_err(|e| StorageError::Backend(format!("{e:?}")))
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            Self::storage()?
                .set_item(key, value)
                .map_err(|e| StorageError::Backend(format!("{e:?}")))
        }
    }
}
