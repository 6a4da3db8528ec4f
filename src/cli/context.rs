//! Shared command context for CLI commands
//!
//! Loads configuration once and hands out sessions backed by the configured
//! state directory.

use ranksort::config::{self, Config};
use ranksort::error::{Error, Result};
use ranksort::sorter::{SortSession, SortState};
use ranksort::store::{FileStore, load_state};
use std::path::PathBuf;
use tracing::debug;

/// Shared context for CLI commands
pub struct CommandContext {
    /// Effective configuration (file, then environment, then flags)
    pub config: Config,
    /// Store for sort state
    pub store: FileStore,
}

impl CommandContext {
    /// Build the context, letting command-line flags win over config
    pub fn new(data_dir: Option<PathBuf>, no_ties: bool) -> Result<Self> {
        let mut config = config::load()?;
        if let Some(dir) = data_dir {
            config.data_dir = Some(dir);
        }
        if no_ties {
            config.allow_ties = false;
        }

        let store = FileStore::new(config.data_dir());
        debug!(data_dir = %store.dir().display(), allow_ties = config.allow_ties, "command context ready");

        Ok(Self { config, store })
    }

    /// Open the session for `key` with the caller's item list
    pub fn session(&self, key: &str, items: Vec<String>) -> Result<SortSession<FileStore>> {
        Ok(SortSession::open(self.store.clone(), key, items)?
            .with_ties_allowed(self.config.allow_ties))
    }

    /// Open the session for an existing sort, reusing its stored item list
    pub fn existing_session(&self, key: &str) -> Result<SortSession<FileStore>> {
        let items = self.stored_state(key)?.items().to_vec();
        self.session(key, items)
    }

    /// Load the stored state for `key`, failing if there is none
    pub fn stored_state(&self, key: &str) -> Result<SortState> {
        load_state(&self.store, key)?.ok_or_else(|| Error::UnknownKey(key.to_string()))
    }
}
