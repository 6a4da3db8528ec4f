//! Persistence slots for sort state
//!
//! The sorter only needs an opaque string slot per key. `FileStore` keeps one
//! JSON file per key on disk; `MemoryStore` keeps everything in process.

mod storage;

pub use storage::{FileStore, STATE_VERSION, load_state, remove_state, save_state};

use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// A key-value store holding one serialized value per key
pub trait SlotStore {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: String) -> Result<()>;

    /// Remove the value under `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// All keys currently stored, sorted
    fn keys(&self) -> Result<Vec<String>>;
}

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl SlotStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        validate_key(key)?;
        self.slots.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.slots.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.slots.keys().cloned().collect())
    }
}

/// Check that `key` can name a slot
///
/// Keys must be non-empty and use only ASCII letters, digits, `.`, `_` and
/// `-`, and may not start with `.`, so every key maps to a plain file name.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::InvalidInput("key must not be empty".to_string()));
    }
    if key.starts_with('.') {
        return Err(Error::InvalidInput(format!(
            "key '{key}' must not start with '.'"
        )));
    }
    if let Some(bad) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
    {
        return Err(Error::InvalidInput(format!(
            "key '{key}' contains unsupported character '{bad}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_namespaced_keys() {
        assert!(validate_key("songs").is_ok());
        assert!(validate_key("song-rankings-edelNote").is_ok());
        assert!(validate_key("group_1.v2").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_paths() {
        assert!(matches!(validate_key(""), Err(Error::InvalidInput(_))));
        assert!(matches!(validate_key("../etc"), Err(Error::InvalidInput(_))));
        assert!(matches!(validate_key("a/b"), Err(Error::InvalidInput(_))));
        assert!(matches!(validate_key(".hidden"), Err(Error::InvalidInput(_))));
        assert!(matches!(validate_key("with space"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.get("songs").unwrap().is_none());

        store.set("songs", "{}".to_string()).unwrap();
        assert_eq!(store.get("songs").unwrap().as_deref(), Some("{}"));
        assert_eq!(store.keys().unwrap(), vec!["songs".to_string()]);

        store.remove("songs").unwrap();
        store.remove("songs").unwrap();
        assert!(store.is_empty());
    }
}
