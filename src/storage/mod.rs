//! Persistence of the selected sight.
//!
//! A collaborator of the controller: the dispatcher saves what was
//! shown, the host restores it at startup.

pub mod config;

pub use config::{default_config_path, ConfigStore, SavedSight, StorageError};
