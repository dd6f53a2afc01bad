//! HttpDeskApi - REST implementation of the back-office API.
//!
//! One method, one request. No retries, no caching: every failure goes back
//! to the caller as a `DeskError::Transport`.

use std::time::Duration;

use apdesk_core::api::DeskApi;
use apdesk_core::approval::{ApprovalId, ApprovalRecord, ApprovalRequest};
use apdesk_core::client::{Client as DeskClient, ClientId, NewClient};
use apdesk_core::config::{ApiConfig, DEFAULT_API_BASE_URL};
use apdesk_core::document::{DocumentResponse, FileKind, UploadedDocument};
use apdesk_core::error::{DeskError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

/// Longest error body excerpt kept in a transport error message.
const ERROR_BODY_LIMIT: usize = 512;

/// API client that talks to the back office over HTTP.
#[derive(Clone)]
pub struct HttpDeskApi {
    client: Client,
    base_url: String,
}

impl HttpDeskApi {
    /// Creates a client for `base_url` (e.g. `https://host/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: normalize_base_url(&base_url.into()),
        }
    }

    /// Builds a client from the `[api]` config section.
    ///
    /// # Errors
    ///
    /// Returns a config error if `timeout_secs` is zero.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        if config.timeout_secs == 0 {
            return Err(DeskError::config("api.timeout_secs must be greater than 0"));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DeskError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: normalize_base_url(&config.base_url),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, request: reqwest::RequestBuilder, what: &str) -> Result<Response> {
        let response = request.send().await.map_err(|err| map_reqwest_error(what, err))?;
        ensure_success(response, what).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);
        let response = self.send(self.client.get(&url), path).await?;
        response
            .json()
            .await
            .map_err(|err| DeskError::transport(format!("Failed to parse {} response: {}", path, err)))
    }

    async fn get_document(&self, path: &str) -> Result<DocumentResponse> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);
        let response = self.send(self.client.get(&url), path).await?;
        read_document(response, path).await
    }
}

impl Default for HttpDeskApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

#[async_trait]
impl DeskApi for HttpDeskApi {
    async fn list_clients(&self) -> Result<Vec<DeskClient>> {
        self.get_json("all-clients").await
    }

    async fn list_approvals(&self) -> Result<Vec<ApprovalRecord>> {
        self.get_json("all-approvals").await
    }

    async fn create_client(&self, client: &NewClient) -> Result<DeskClient> {
        let mut form = Form::new()
            .text("manager", client.manager.clone())
            .text("directors_name", client.directors_name.clone())
            .text("address", client.address.clone());
        if let Some(letter_head) = &client.letter_head {
            form = form.part("letter_head", file_part(letter_head)?);
        }
        if let Some(signature) = &client.signature {
            form = form.part("signature", file_part(signature)?);
        }

        tracing::debug!(
            "POST {} ({} attachment(s))",
            self.url("clients"),
            client.attachment_count()
        );
        let response = self
            .send(self.client.post(self.url("clients")).multipart(form), "clients")
            .await?;
        response
            .json()
            .await
            .map_err(|err| DeskError::transport(format!("Failed to parse created client: {}", err)))
    }

    async fn delete_client(&self, id: ClientId) -> Result<()> {
        let path = format!("clients/{}", id);
        tracing::debug!("DELETE {}", self.url(&path));
        self.send(self.client.delete(self.url(&path)), &path).await?;
        Ok(())
    }

    async fn download_file(&self, kind: FileKind, id: ClientId) -> Result<DocumentResponse> {
        self.get_document(&format!("download/{}/{}", kind.as_ref(), id))
            .await
    }

    async fn create_approval(&self, request: &ApprovalRequest) -> Result<ApprovalRecord> {
        tracing::debug!("POST {}", self.url("approvals"));
        let response = self
            .send(
                self.client.post(self.url("approvals")).json(request),
                "approvals",
            )
            .await?;
        response.json().await.map_err(|err| {
            DeskError::transport(format!("Failed to parse created approval: {}", err))
        })
    }

    async fn fetch_approval_pdf(&self, id: ApprovalId) -> Result<DocumentResponse> {
        self.get_document(&format!("approvals/{}/pdf", id)).await
    }

    async fn upload_approval_pdf(&self, id: ApprovalId, pdf: &UploadedDocument) -> Result<()> {
        let path = format!("approvals/{}/upload-pdf", id);
        let form = Form::new().part("pdf", file_part(pdf)?);
        tracing::debug!("POST {} ({} bytes)", self.url(&path), pdf.size());
        self.send(self.client.post(self.url(&path)).multipart(form), &path)
            .await?;
        Ok(())
    }
}

fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

fn file_part(document: &UploadedDocument) -> Result<Part> {
    Part::bytes(document.bytes.clone())
        .file_name(document.file_name.clone())
        .mime_str(&document.content_type)
        .map_err(|err| {
            DeskError::validation(format!(
                "Invalid content type '{}' for {}: {}",
                document.content_type, document.file_name, err
            ))
        })
}

fn map_reqwest_error(what: &str, err: reqwest::Error) -> DeskError {
    DeskError::Transport {
        status: err.status().map(|s| s.as_u16()),
        message: format!("Request to {} failed: {}", what, err),
    }
}

async fn ensure_success(response: Response, what: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());
    Err(DeskError::http_status(
        status.as_u16(),
        format!("{} returned {}: {}", what, status, truncate(&body, ERROR_BODY_LIMIT)),
    ))
}

async fn read_document(response: Response, what: &str) -> Result<DocumentResponse> {
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = response
        .bytes()
        .await
        .map_err(|err| map_reqwest_error(what, err))?;
    Ok(DocumentResponse {
        content_type,
        bytes: bytes.to_vec(),
    })
}

fn truncate(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
