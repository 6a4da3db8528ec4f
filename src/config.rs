//! Configuration for ranksort
//!
//! Read from `<config_dir>/ranksort/config.toml` (or `$RANKSORT_CONFIG`),
//! then overridden by `RANKSORT_*` environment variables. Every field is
//! optional; a missing file means defaults.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "RANKSORT_CONFIG";
/// Environment override for [`Config::data_dir`]
pub const DATA_DIR_ENV: &str = "RANKSORT_DATA_DIR";
/// Environment override for [`Config::allow_ties`]
pub const ALLOW_TIES_ENV: &str = "RANKSORT_ALLOW_TIES";

const APP_DIR: &str = "ranksort";
const CONFIG_FILE: &str = "config.toml";

/// User configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where sort state is stored (default: `<data_dir>/ranksort`)
    pub data_dir: Option<PathBuf>,
    /// Whether `tie` is accepted
    pub allow_ties: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            allow_ties: true,
        }
    }
}

impl Config {
    /// Resolved state directory
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }
}

/// Platform default state directory
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Default config file location, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Load config from `path`; a missing file yields defaults
pub fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}

/// Apply `RANKSORT_*` overrides read through `var`
pub fn apply_overrides<F>(config: &mut Config, var: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = var(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
        config.data_dir = Some(PathBuf::from(dir));
    }
    if let Some(value) = var(ALLOW_TIES_ENV) {
        config.allow_ties = parse_bool(&value).ok_or_else(|| {
            Error::Config(format!("{ALLOW_TIES_ENV} must be true or false, got '{value}'"))
        })?;
    }
    Ok(())
}

/// Load config from the environment-selected or default file, with
/// environment overrides applied
pub fn load() -> Result<Config> {
    let var = |name: &str| std::env::var(name).ok();
    let path = var(CONFIG_ENV).map(PathBuf::from).or_else(default_config_path);

    let mut config = match path {
        Some(path) => load_from(&path)?,
        None => Config::default(),
    };
    apply_overrides(&mut config, var)?;
    Ok(config)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_from(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.allow_ties);
    }

    #[test]
    fn test_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "allow_ties = false\n").unwrap();

        let config = load_from(&path).unwrap();
        assert!(!config.allow_ties);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "allow_ties = \"sometimes\"\n").unwrap();

        assert!(matches!(load_from(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = Config {
            data_dir: Some(PathBuf::from("/from/file")),
            allow_ties: true,
        };
        apply_overrides(
            &mut config,
            env(&[(DATA_DIR_ENV, "/from/env"), (ALLOW_TIES_ENV, "no")]),
        )
        .unwrap();

        assert_eq!(config.data_dir(), PathBuf::from("/from/env"));
        assert!(!config.allow_ties);
    }

    #[test]
    fn test_empty_data_dir_env_is_ignored() {
        let mut config = Config::default();
        apply_overrides(&mut config, env(&[(DATA_DIR_ENV, "")])).unwrap();
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_bad_bool_env_is_error() {
        let mut config = Config::default();
        let result = apply_overrides(&mut config, env(&[(ALLOW_TIES_ENV, "maybe")]));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
