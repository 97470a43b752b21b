//! Minimal key-value persistence
//!
//! The game stores exactly one value (the best score), so the contract is a
//! plain string get/set. Backends:
//! - `MemoryStore`: in-process, for tests and throwaway sessions
//! - `FileStore`: JSON file on disk (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm, see `platform::web`)

mod file;

use std::collections::HashMap;

use thiserror::Error;

pub use file::FileStore;

/// Errors raised by store backends
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store contents are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage backend unavailable")]
    Unavailable,
}

/// String key-value store. A missing key is `None`, never an error.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
