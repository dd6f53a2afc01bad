//! Reading local files into upload payloads.

use std::path::{Path, PathBuf};

use apdesk_core::document::{ReplacementPicker, UploadedDocument};
use apdesk_core::error::{DeskError, Result};
use async_trait::async_trait;

/// Infers the MIME type from a filename extension using `mime_guess`.
pub fn guess_content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Reads a file from disk into an [`UploadedDocument`].
pub async fn read_uploaded_document(path: &Path) -> Result<UploadedDocument> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| DeskError::io(format!("Failed to read {}: {}", path.display(), e)))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| DeskError::validation(format!("Not a file: {}", path.display())))?;

    Ok(UploadedDocument::new(file_name, guess_content_type(path), bytes))
}

/// Picker whose answer was decided up front (for example by a CLI flag).
///
/// `None` behaves like a user who closes the file dialog.
#[derive(Debug, Clone, Default)]
pub struct PresetPicker {
    path: Option<PathBuf>,
}

impl PresetPicker {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn declined() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReplacementPicker for PresetPicker {
    async fn pick(&self, accept: &str) -> Result<Option<UploadedDocument>> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        let document = read_uploaded_document(path).await?;
        if !document.matches(accept) {
            return Err(DeskError::validation(format!(
                "{} is {}, expected {}",
                document.file_name, document.content_type, accept
            )));
        }
        Ok(Some(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apdesk_core::document::PDF_CONTENT_TYPE;
    use tempfile::TempDir;

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type(Path::new("a.pdf")), "application/pdf");
        assert_eq!(guess_content_type(Path::new("sig.PNG")), "image/png");
        assert_eq!(
            guess_content_type(Path::new("noext")),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_read_uploaded_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("edited.pdf");
        std::fs::write(&path, b"%PDF").unwrap();

        let doc = read_uploaded_document(&path).await.unwrap();
        assert_eq!(doc.file_name, "edited.pdf");
        assert_eq!(doc.content_type, "application/pdf");
        assert_eq!(doc.bytes, b"%PDF");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let err = read_uploaded_document(Path::new("/definitely/not/here.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, DeskError::Io { .. }));
    }

    #[tokio::test]
    async fn test_preset_picker() {
        assert!(PresetPicker::declined().pick(PDF_CONTENT_TYPE).await.unwrap().is_none());

        let temp_dir = TempDir::new().unwrap();
        let png = temp_dir.path().join("scan.png");
        std::fs::write(&png, b"png").unwrap();
        let err = PresetPicker::new(Some(png)).pick(PDF_CONTENT_TYPE).await.unwrap_err();
        assert!(err.is_validation());

        let pdf = temp_dir.path().join("edited.pdf");
        std::fs::write(&pdf, b"%PDF").unwrap();
        let doc = PresetPicker::new(Some(pdf)).pick(PDF_CONTENT_TYPE).await.unwrap();
        assert!(doc.is_some());
    }
}
