//! Binary documents moving between the console and the API.
//!
//! Downloads arrive as [`DocumentResponse`] and are handed to a
//! [`DownloadSink`]; uploads are assembled from an [`UploadedDocument`],
//! which a [`ReplacementPicker`] may supply on user request.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString};

use crate::error::Result;

/// Media type of generated approval documents.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Stored client artifact kinds served by `GET /download/{type}/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FileKind {
    LetterHead,
    Signature,
}

impl FileKind {
    /// Extension used when the response does not say what it is.
    pub fn fallback_extension(&self) -> &'static str {
        match self {
            FileKind::LetterHead => "pdf",
            FileKind::Signature => "png",
        }
    }
}

/// A binary body together with the content type the server declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentResponse {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Shape of the error body returned instead of a PDF.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl DocumentResponse {
    pub fn new(content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            content_type: content_type.map(str::to_string),
            bytes,
        }
    }

    /// Media type without parameters, lowercased (`application/pdf`).
    pub fn media_type(&self) -> Option<String> {
        self.content_type.as_deref().map(|ct| {
            ct.split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        })
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type().as_deref() == Some(PDF_CONTENT_TYPE)
    }

    /// Decodes the body as text and extracts its `message` field.
    ///
    /// Returns `None` when the body is not JSON or carries no message.
    pub fn error_message(&self) -> Option<String> {
        let text = String::from_utf8_lossy(&self.bytes);
        serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .filter(|m| !m.is_empty())
    }
}

/// A user-selected local file, held only for a single upload call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Whether this file satisfies an `accept` filter such as `application/pdf`.
    pub fn matches(&self, accept: &str) -> bool {
        self.content_type.eq_ignore_ascii_case(accept)
    }
}

/// Offers downloaded bytes to the user under a chosen file name.
#[async_trait]
pub trait DownloadSink: Send + Sync {
    /// Delivers the document and returns where it ended up.
    async fn offer(&self, file_name: &str, document: &DocumentResponse) -> Result<PathBuf>;
}

/// User-driven selection of a single file.
///
/// Returning `Ok(None)` means the user declined; there is no timeout.
#[async_trait]
pub trait ReplacementPicker: Send + Sync {
    async fn pick(&self, accept: &str) -> Result<Option<UploadedDocument>>;
}
