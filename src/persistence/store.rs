//! Key/value backends for the progress record
//!
//! - `MemoryStore`: in-process map (tests, headless runs)
//! - `FileStore`: one JSON file per key in a directory (native)
//! - `LocalStore`: browser LocalStorage (wasm32)

use std::collections::HashMap;

use crate::error::GameError;

/// Minimal string key/value storage
pub trait ProgressStore {
    /// Read a value; `Ok(None)` when the key was never written
    fn read(&self, key: &str) -> Result<Option<String>, GameError>;

    /// Write (replace) a value
    fn write(&mut self, key: &str, value: &str) -> Result<(), GameError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value, for inspection
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl ProgressStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, GameError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), GameError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-per-key store rooted at a directory
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> std::path::PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn storage_error(key: &str, source: std::io::Error) -> GameError {
        GameError::Storage {
            key: key.to_string(),
            source,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ProgressStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, GameError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::storage_error(key, e)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), GameError> {
        // Write to a temp file then rename so a crash never leaves half a record
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::create_dir_all(&self.dir).map_err(|e| Self::storage_error(key, e))?;
        std::fs::write(&tmp, value).map_err(|e| Self::storage_error(key, e))?;
        std::fs::rename(&tmp, &path).map_err(|e| Self::storage_error(key, e))
    }
}

/// Browser LocalStorage store
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    fn storage(key: &str) -> Result<web_sys::Storage, GameError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| GameError::Storage {
                key: key.to_string(),
                source: std::io::Error::other("LocalStorage unavailable"),
            })
    }

    fn js_error(key: &str, err: wasm_bindgen::JsValue) -> GameError {
        GameError::Storage {
            key: key.to_string(),
            source: std::io::Error::other(format!("{:?}", err)),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl ProgressStore for LocalStore {
    fn read(&self, key: &str) -> Result<Option<String>, GameError> {
        Self::storage(key)?
            .get_item(key)
            .map_err(|e| Self::js_error(key, e))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), GameError> {
        Self::storage(key)?
            .set_item(key, value)
            .map_err(|e| Self::js_error(key, e))
    }
}
