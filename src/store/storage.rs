//! On-disk slots and the persisted state envelope.

use super::{SlotStore, validate_key};
use crate::error::{Error, Result};
use crate::sorter::SortState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Current envelope format version.
pub const STATE_VERSION: u32 = 1;

/// Extension used for slot files.
const SLOT_EXTENSION: &str = "json";

/// Wrapper written around every persisted state.
#[derive(Debug, Serialize, Deserialize)]
struct StateEnvelope {
    version: u32,
    saved_at: DateTime<Utc>,
    state: SortState,
}

/// Directory-backed store: one `<key>.json` file per key.
///
/// The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store slots under `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the slot files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn slot_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{SLOT_EXTENSION}")))
    }
}

impl SlotStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| Error::Storage(format!("failed to read {}: {e}", path.display())))?;
        Ok(Some(content))
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let path = self.slot_path(key)?;

        // Ensure directory exists
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| {
                Error::Storage(format!("failed to create {}: {e}", self.dir.display()))
            })?;
        }

        // Write to a sibling first so a crash never leaves a half-written slot
        let tmp = path.with_extension(format!("{SLOT_EXTENSION}.tmp"));
        fs::write(&tmp, value)
            .map_err(|e| Error::Storage(format!("failed to write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &path)
            .map_err(|e| Error::Storage(format!("failed to write {}: {e}", path.display())))?;

        debug!(key, path = %path.display(), "saved slot");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| Error::Storage(format!("failed to remove {}: {e}", path.display())))?;
            debug!(key, "removed slot");
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir)
            .map_err(|e| Error::Storage(format!("failed to list {}: {e}", self.dir.display())))?;

        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SLOT_EXTENSION) {
                continue;
            }
            if let Some(key) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_key(key).is_ok() {
                    keys.push(key.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Load the sort state stored under `key`.
///
/// Returns `None` if nothing is stored. A stored state that fails to decode,
/// carries an unknown version, or breaks the sorter invariants is an error.
pub fn load_state(store: &impl SlotStore, key: &str) -> Result<Option<SortState>> {
    let Some(content) = store.get(key)? else {
        return Ok(None);
    };

    let envelope: StateEnvelope = serde_json::from_str(&content)
        .map_err(|e| Error::Storage(format!("failed to parse state for '{key}': {e}")))?;

    if envelope.version != STATE_VERSION {
        return Err(Error::Storage(format!(
            "state for '{key}' has version {}, expected {STATE_VERSION}",
            envelope.version
        )));
    }

    envelope.state.validate()?;
    Ok(Some(envelope.state))
}

/// Save `state` under `key`, stamped with the current version and time.
pub fn save_state(store: &mut impl SlotStore, key: &str, state: &SortState) -> Result<()> {
    let envelope = StateEnvelope {
        version: STATE_VERSION,
        saved_at: Utc::now(),
        state: state.clone(),
    };

    let content = serde_json::to_string_pretty(&envelope)
        .map_err(|e| Error::Storage(format!("failed to serialize state for '{key}': {e}")))?;

    store.set(key, content)
}

/// Remove whatever is stored under `key`.
pub fn remove_state(store: &mut impl SlotStore, key: &str) -> Result<()> {
    store.remove(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use tempfile::TempDir;

    fn setup_store() -> (TempDir, FileStore) {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("state"));
        (temp, store)
    }

    #[test]
    fn test_slot_path() {
        let (_temp, store) = setup_store();
        let path = store.slot_path("songs").unwrap();
        assert!(path.ends_with("state/songs.json"));
    }

    #[test]
    fn test_slot_path_rejects_traversal() {
        let (_temp, store) = setup_store();
        assert!(matches!(
            store.slot_path("../songs"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_load_missing_returns_none() {
        let (_temp, store) = setup_store();
        assert!(load_state(&store, "songs").unwrap().is_none());
    }

    #[test]
    fn test_save_creates_directory() {
        let (_temp, mut store) = setup_store();
        assert!(!store.dir().exists());

        save_state(&mut store, "songs", &SortState::new(["a", "b"])).unwrap();

        assert!(store.dir().exists());
        assert!(store.slot_path("songs").unwrap().exists());
    }

    #[test]
    fn test_roundtrip_mid_sort() {
        let (_temp, mut store) = setup_store();

        let mut state = SortState::new(["a", "b", "c", "d"]);
        state.left();
        state.tie();

        save_state(&mut store, "songs", &state).unwrap();
        let loaded = load_state(&store, "songs").unwrap().unwrap();

        assert_eq!(loaded, state);
        assert_eq!(loaded.history_depth(), 2);
    }

    #[test]
    fn test_file_carries_version() {
        let (_temp, mut store) = setup_store();
        save_state(&mut store, "songs", &SortState::new(["a"])).unwrap();

        let content = fs::read_to_string(store.slot_path("songs").unwrap()).unwrap();
        assert!(content.contains("\"version\": 1"));
        assert!(content.contains("saved_at"));
    }

    #[test]
    fn test_unknown_version_is_error() {
        let (_temp, mut store) = setup_store();
        save_state(&mut store, "songs", &SortState::new(["a"])).unwrap();

        let path = store.slot_path("songs").unwrap();
        let content = fs::read_to_string(&path)
            .unwrap()
            .replace("\"version\": 1", "\"version\": 99");
        fs::write(&path, content).unwrap();

        assert!(matches!(load_state(&store, "songs"), Err(Error::Storage(_))));
    }

    #[test]
    fn test_garbage_is_storage_error() {
        let mut store = MemoryStore::new();
        store.set("songs", "not json".to_string()).unwrap();
        assert!(matches!(load_state(&store, "songs"), Err(Error::Storage(_))));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_temp, mut store) = setup_store();
        save_state(&mut store, "songs", &SortState::new(["a", "b"])).unwrap();

        remove_state(&mut store, "songs").unwrap();
        remove_state(&mut store, "songs").unwrap();
        assert!(load_state(&store, "songs").unwrap().is_none());
    }

    #[test]
    fn test_keys_lists_only_slots() {
        let (_temp, mut store) = setup_store();
        save_state(&mut store, "songs", &SortState::new(["a"])).unwrap();
        save_state(&mut store, "song-rankings-edelNote", &SortState::new(["b"])).unwrap();
        fs::write(store.dir().join("notes.txt"), "ignored").unwrap();

        assert_eq!(
            store.keys().unwrap(),
            vec!["song-rankings-edelNote".to_string(), "songs".to_string()]
        );
    }

    #[test]
    fn test_keys_on_missing_dir_is_empty() {
        let (_temp, store) = setup_store();
        assert!(store.keys().unwrap().is_empty());
    }
}
