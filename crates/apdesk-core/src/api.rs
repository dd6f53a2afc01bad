//! Remote API contract.
//!
//! Defines the operations the console consumes from the back-office HTTP API.
//! The API is the sole source of truth; the console never caches its data.

use async_trait::async_trait;

use crate::approval::{ApprovalId, ApprovalRecord, ApprovalRequest};
use crate::client::{Client, ClientId, NewClient};
use crate::document::{DocumentResponse, FileKind, UploadedDocument};
use crate::error::Result;

/// An abstract client of the back-office API.
///
/// Every method maps to exactly one HTTP call. Implementations must not
/// retry; failures are reported as [`DeskError::Transport`](crate::DeskError).
#[async_trait]
pub trait DeskApi: Send + Sync {
    /// `GET /all-clients`
    async fn list_clients(&self) -> Result<Vec<Client>>;

    /// `GET /all-approvals`
    async fn list_approvals(&self) -> Result<Vec<ApprovalRecord>>;

    /// `POST /clients` as multipart with up to two attachments.
    async fn create_client(&self, client: &NewClient) -> Result<Client>;

    /// `DELETE /clients/{id}`
    async fn delete_client(&self, id: ClientId) -> Result<()>;

    /// `GET /download/{type}/{id}`
    async fn download_file(&self, kind: FileKind, id: ClientId) -> Result<DocumentResponse>;

    /// `POST /approvals` as JSON.
    async fn create_approval(&self, request: &ApprovalRequest) -> Result<ApprovalRecord>;

    /// `GET /approvals/{id}/pdf`
    ///
    /// A success status does not imply a PDF body; callers inspect the
    /// declared content type.
    async fn fetch_approval_pdf(&self, id: ApprovalId) -> Result<DocumentResponse>;

    /// `POST /approvals/{id}/upload-pdf` as multipart field `pdf`.
    async fn upload_approval_pdf(&self, id: ApprovalId, pdf: &UploadedDocument) -> Result<()>;
}
