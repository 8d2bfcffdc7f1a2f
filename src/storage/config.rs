//! JSON selection file.
//!
//! Stores the chosen preset id and config, by default in
//! `<config root>/sightfront/config.json`.
//!
//! Uses an in-memory cache to avoid disk I/O on every slider change.
//! Call [`ConfigStore::flush`] to persist changes to disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::model::{find_preset, SightConfig};

/// Serializable selection for JSON persistence.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SavedSight {
    /// Preset the config came from, if any. Informational; `config` is
    /// what gets applied.
    #[serde(default)]
    pub preset_id: Option<String>,
    pub config: SightConfig,
}

impl SavedSight {
    pub fn from_preset(id: &str) -> Option<Self> {
        find_preset(id).map(|p| Self {
            preset_id: Some(p.id.to_string()),
            config: p.config.clone(),
        })
    }

    pub fn custom(config: SightConfig) -> Self {
        Self {
            preset_id: None,
            config,
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to create config directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write config file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize config")]
    Serialize(#[from] serde_json::Error),
}

/// Default config file path.
///
/// `%APPDATA%` on Windows, `$XDG_CONFIG_HOME` or `$HOME/.config`
/// elsewhere, the working directory as a last resort.
pub fn default_config_path() -> PathBuf {
    let root = if cfg!(target_os = "windows") {
        std::env::var_os("APPDATA").map(PathBuf::from)
    } else {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
    };
    root.unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

/// Cached selection store backed by one JSON file.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    cache: Option<SavedSight>,
    dirty: bool,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: None,
            dirty: false,
        }
    }

    pub fn at_default_path() -> Self {
        Self::new(default_config_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Cached selection, loading from disk on first use.
    pub fn load(&mut self) -> &SavedSight {
        let path = &self.path;
        self.cache.get_or_insert_with(|| load_from_disk(path))
    }

    /// Updates the cache and marks it dirty. Nothing is written until
    /// [`flush`](Self::flush).
    pub fn save(&mut self, saved: SavedSight) {
        self.cache = Some(saved);
        self.dirty = true;
    }

    /// Writes the cache to disk if dirty.
    pub fn flush(&mut self) -> Result<(), StorageError> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(saved) = &self.cache {
            save_to_disk(&self.path, saved)?;
        }
        self.dirty = false;
        Ok(())
    }
}

/// Reads the selection, returning defaults if missing or invalid.
fn load_from_disk(path: &Path) -> SavedSight {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "no saved sight, using default");
            return SavedSight::default();
        }
    };
    let saved: SavedSight = match serde_json::from_str(&contents) {
        Ok(saved) => saved,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "unreadable saved sight, using default");
            return SavedSight::default();
        }
    };
    if let Err(err) = saved.config.validate() {
        warn!(path = %path.display(), error = %err, "invalid saved sight, using default");
        return SavedSight::default();
    }
    saved
}

fn save_to_disk(path: &Path, saved: &SavedSight) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(saved)?;
    fs::write(path, json).map_err(|source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "saved sight written");
    Ok(())
}
