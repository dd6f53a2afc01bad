//! Unified path management for apdesk files.
//!
//! Platform directories come from the `dirs` crate. Passing a base directory
//! pins everything under it, which is what tests and `--config-dir` use.

use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "apdesk";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for apdesk_core::DeskError {
    fn from(err: PathError) -> Self {
        apdesk_core::DeskError::config(err.to_string())
    }
}

/// Resolves every file location used by the console.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/apdesk/              # Config directory
/// ├── config.toml                # Console configuration
/// ├── local_storage.toml         # Persisted key/value state (session marker)
/// └── logs/
///     └── apdesk.log.YYYY-MM-DD
///
/// ~/Downloads/                   # Default download directory
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeskPaths {
    base: Option<PathBuf>,
}

impl DeskPaths {
    /// Creates a resolver. `Some(base)` replaces both config and data roots.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the apdesk configuration directory (e.g. `~/.config/apdesk/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the apdesk data directory (e.g. `~/.local/share/apdesk/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base {
            return Ok(base.join("data"));
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Key/value file holding the session marker.
    pub fn local_storage_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("local_storage.toml"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }

    /// Default target for downloads.
    ///
    /// Uses the platform download directory, falling back to
    /// `<data_dir>/downloads` when the platform has none.
    pub fn downloads_dir(&self) -> Result<PathBuf, PathError> {
        if self.base.is_none() {
            if let Some(dir) = dirs::download_dir() {
                return Ok(dir);
            }
        }
        Ok(self.data_dir()?.join("downloads"))
    }
}
