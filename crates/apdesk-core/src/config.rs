//! Console configuration model.
//!
//! Loaded from `config.toml`; every section and field has a default so a
//! missing or partial file is valid.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Base URL of the production back-office API.
pub const DEFAULT_API_BASE_URL: &str = "https://ajp.afreebmart.com/api";

/// File name offered for every generated approval document.
pub const DEFAULT_DOCUMENT_FILE_NAME: &str = "approval_document.pdf";

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RootConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub downloads: DownloadConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds. Must be greater than 0.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct DownloadConfig {
    /// Where downloads are written. `None` means the platform download dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct WorkflowConfig {
    #[serde(default = "default_document_file_name")]
    pub document_file_name: String,
    /// Surface replacement-upload failures instead of only logging them.
    #[serde(default)]
    pub notify_upload_failure: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            document_file_name: default_document_file_name(),
            notify_upload_failure: false,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_document_file_name() -> String {
    DEFAULT_DOCUMENT_FILE_NAME.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config: RootConfig = toml::from_str("").unwrap();
        assert_eq!(config, RootConfig::default());
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.workflow.document_file_name, "approval_document.pdf");
        assert!(!config.workflow.notify_upload_failure);
    }

    #[test]
    fn test_partial_sections() {
        let config: RootConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://localhost:8000/api"

            [workflow]
            notify_upload_failure = true
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.workflow.notify_upload_failure);
        assert_eq!(config.logging.level, "info");
    }
}
