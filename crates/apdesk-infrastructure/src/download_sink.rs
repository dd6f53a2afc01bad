//! Filesystem download sink.

use std::io::Write;
use std::path::{Path, PathBuf};

use apdesk_core::document::{DocumentResponse, DownloadSink};
use apdesk_core::error::{DeskError, Result};
use async_trait::async_trait;
use tempfile::NamedTempFile;

/// Writes offered documents into a downloads directory.
///
/// Each document is staged in a temporary file next to its destination and
/// persisted under the requested name; the temporary handle is released as
/// soon as the file is in place.
#[derive(Debug, Clone)]
pub struct FileSystemDownloadSink {
    dir: PathBuf,
}

impl FileSystemDownloadSink {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Keeps only the final path component so a server-chosen or user-typed name
/// cannot escape the downloads directory.
fn sanitize_file_name(file_name: &str) -> Result<String> {
    Path::new(file_name)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| DeskError::validation(format!("Invalid file name: '{}'", file_name)))
}

fn write_download(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let target = dir.join(file_name);

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(bytes)?;
    staged.flush()?;
    staged
        .persist(&target)
        .map_err(|e| DeskError::from(e.error))?;

    Ok(target)
}

#[async_trait]
impl DownloadSink for FileSystemDownloadSink {
    async fn offer(&self, file_name: &str, document: &DocumentResponse) -> Result<PathBuf> {
        let file_name = sanitize_file_name(file_name)?;
        let dir = self.dir.clone();
        let bytes = document.bytes.clone();

        let target = tokio::task::spawn_blocking(move || write_download(&dir, &file_name, &bytes))
            .await
            .map_err(|e| DeskError::internal(format!("Failed to join task: {}", e)))??;

        tracing::info!(
            "Saved download {} ({} bytes, {})",
            target.display(),
            document.bytes.len(),
            document.content_type.as_deref().unwrap_or("unknown type")
        );
        Ok(target)
    }
}
