//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml`
//! (`~/.config/apdesk/config.toml` unless overridden).

use std::path::PathBuf;

use apdesk_core::config::RootConfig;
use apdesk_core::error::Result;

use crate::paths::DeskPaths;
use crate::storage::AtomicTomlFile;

/// Environment variable that replaces `api.base_url`.
pub const API_URL_ENV: &str = "APDESK_API_URL";

/// Reads (and on request, initializes) the console configuration.
///
/// # Example
///
/// ```ignore
/// use apdesk_infrastructure::ConfigService;
///
/// let config = ConfigService::new(&DeskPaths::default())?.load()?;
/// println!("API: {}", config.api.base_url);
/// ```
pub struct ConfigService {
    file: AtomicTomlFile<RootConfig>,
}

impl ConfigService {
    pub fn new(paths: &DeskPaths) -> Result<Self> {
        Ok(Self::with_path(paths.config_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }

    /// Loads the file as-is; a missing file yields the defaults.
    pub fn load(&self) -> Result<RootConfig> {
        Ok(self.file.load()?.unwrap_or_default())
    }

    /// Loads the file and applies environment overrides.
    pub fn load_with_env(&self) -> Result<RootConfig> {
        let config = self.load()?;
        Ok(apply_overrides(config, std::env::var(API_URL_ENV).ok()))
    }

    /// Writes the default configuration unless a file already exists.
    ///
    /// Returns `true` when a file was created.
    pub fn ensure_exists(&self) -> Result<bool> {
        if self.file.path().exists() {
            return Ok(false);
        }
        self.file.save(&RootConfig::default())?;
        tracing::info!("Created default config at {}", self.file.path().display());
        Ok(true)
    }
}

/// Applies overrides that take precedence over the file.
pub fn apply_overrides(mut config: RootConfig, api_url: Option<String>) -> RootConfig {
    if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
        config.api.base_url = url.trim().to_string();
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use apdesk_core::config::DEFAULT_API_BASE_URL;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(&DeskPaths::new(Some(temp_dir.path()))).unwrap();
        assert_eq!(service.load().unwrap(), RootConfig::default());
    }

    #[test]
    fn test_ensure_exists_only_once() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));
        assert!(service.ensure_exists().unwrap());
        assert!(!service.ensure_exists().unwrap());
        assert_eq!(service.load().unwrap().api.base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_reads_custom_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"http://localhost:9000/api\"\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = ConfigService::with_path(path).load().unwrap();
        assert_eq!(config.api.base_url, "http://localhost:9000/api");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_apply_overrides() {
        let config = apply_overrides(RootConfig::default(), Some(" http://x/api ".to_string()));
        assert_eq!(config.api.base_url, "http://x/api");

        let untouched = apply_overrides(RootConfig::default(), Some("  ".to_string()));
        assert_eq!(untouched.api.base_url, DEFAULT_API_BASE_URL);
    }
}
