//! Launcher configuration model.
//!
//! Describes everything the launcher prepares before it starts the daemon:
//! the pidfile to check, the directories to provision, and the files to
//! copy into place. Order within each list is preserved.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GreenskeeperError, Result};
use crate::types::{DirectorySpec, FileSpec};

/// Root configuration consumed by `greenskeeper_core::startup::prepare`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherConfig {
    /// Pidfile of a previous daemon instance, checked before anything else.
    #[serde(default)]
    pub pidfile: Option<PathBuf>,
    /// Directories provisioned in order.
    #[serde(default)]
    pub directories: Vec<DirectorySpec>,
    /// Files copied into place in order, after the directories exist.
    #[serde(default)]
    pub files: Vec<FileSpec>,
}

impl LauncherConfig {
    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`GreenskeeperError::ConfigIo`] if the file cannot be read and
    /// [`GreenskeeperError::ConfigParse`] if it is not a valid configuration.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| GreenskeeperError::ConfigIo {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&raw).map_err(|e| GreenskeeperError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
