//! In-memory collaborators shared by the unit tests of this crate.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use apdesk_core::api::DeskApi;
use apdesk_core::approval::{ApprovalId, ApprovalRecord, ApprovalRequest};
use apdesk_core::client::{Client, ClientId, NewClient};
use apdesk_core::document::{DocumentResponse, DownloadSink, FileKind, ReplacementPicker, UploadedDocument};
use apdesk_core::error::{DeskError, Result};
use apdesk_core::notification::{Confirmer, Notification, NotificationLevel, Notifier};
use apdesk_core::session::SessionStore;
use async_trait::async_trait;

pub fn client(id: ClientId, manager: &str) -> Client {
    Client {
        id,
        manager: manager.to_string(),
        directors_name: format!("{} Director", manager),
        address: "1 Main St".to_string(),
        letter_head: None,
        signature: None,
    }
}

pub fn record(id: ApprovalId) -> ApprovalRecord {
    ApprovalRecord {
        id,
        client_id: Some(7),
        account_type: None,
        account_number: None,
        amount: None,
        pdf_path: None,
        client: None,
    }
}

pub fn pdf() -> DocumentResponse {
    DocumentResponse::new(Some("application/pdf"), b"%PDF-1.7 fake".to_vec())
}

/// Scripted API. Each queue is popped per call; an empty queue answers
/// with a transport error.
#[derive(Default)]
pub struct MockApi {
    pub clients: Mutex<VecDeque<Result<Vec<Client>>>>,
    pub approvals: Mutex<VecDeque<Result<Vec<ApprovalRecord>>>>,
    pub created_clients: Mutex<VecDeque<Result<Client>>>,
    pub deletions: Mutex<VecDeque<Result<()>>>,
    pub downloads: Mutex<VecDeque<Result<DocumentResponse>>>,
    pub created_approvals: Mutex<VecDeque<Result<ApprovalRecord>>>,
    pub pdfs: Mutex<VecDeque<Result<DocumentResponse>>>,
    pub uploads: Mutex<VecDeque<Result<()>>>,
    pub calls: Mutex<Vec<String>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_clients(&self, result: Result<Vec<Client>>) -> &Self {
        self.clients.lock().unwrap().push_back(result);
        self
    }

    pub fn push_approvals(&self, result: Result<Vec<ApprovalRecord>>) -> &Self {
        self.approvals.lock().unwrap().push_back(result);
        self
    }

    pub fn push_created_client(&self, result: Result<Client>) -> &Self {
        self.created_clients.lock().unwrap().push_back(result);
        self
    }

    pub fn push_deletion(&self, result: Result<()>) -> &Self {
        self.deletions.lock().unwrap().push_back(result);
        self
    }

    pub fn push_download(&self, result: Result<DocumentResponse>) -> &Self {
        self.downloads.lock().unwrap().push_back(result);
        self
    }

    pub fn push_created_approval(&self, result: Result<ApprovalRecord>) -> &Self {
        self.created_approvals.lock().unwrap().push_back(result);
        self
    }

    pub fn push_pdf(&self, result: Result<DocumentResponse>) -> &Self {
        self.pdfs.lock().unwrap().push_back(result);
        self
    }

    pub fn push_upload(&self, result: Result<()>) -> &Self {
        self.uploads.lock().unwrap().push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record_call(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn next<T>(queue: &Mutex<VecDeque<Result<T>>>, what: &str) -> Result<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(DeskError::transport(format!("no scripted {}", what))))
}

#[async_trait]
impl DeskApi for MockApi {
    async fn list_clients(&self) -> Result<Vec<Client>> {
        self.record_call("list_clients".to_string());
        next(&self.clients, "client list")
    }

    async fn list_approvals(&self) -> Result<Vec<ApprovalRecord>> {
        self.record_call("list_approvals".to_string());
        next(&self.approvals, "approval list")
    }

    async fn create_client(&self, client: &NewClient) -> Result<Client> {
        self.record_call(format!("create_client:{}", client.manager));
        next(&self.created_clients, "created client")
    }

    async fn delete_client(&self, id: ClientId) -> Result<()> {
        self.record_call(format!("delete_client:{}", id));
        next(&self.deletions, "deletion")
    }

    async fn download_file(&self, kind: FileKind, id: ClientId) -> Result<DocumentResponse> {
        self.record_call(format!("download_file:{}:{}", kind, id));
        next(&self.downloads, "download")
    }

    async fn create_approval(&self, request: &ApprovalRequest) -> Result<ApprovalRecord> {
        self.record_call(format!("create_approval:{}", request.client_id));
        next(&self.created_approvals, "created approval")
    }

    async fn fetch_approval_pdf(&self, id: ApprovalId) -> Result<DocumentResponse> {
        self.record_call(format!("fetch_approval_pdf:{}", id));
        next(&self.pdfs, "pdf")
    }

    async fn upload_approval_pdf(&self, id: ApprovalId, pdf: &UploadedDocument) -> Result<()> {
        self.record_call(format!("upload_approval_pdf:{}:{}", id, pdf.file_name));
        next(&self.uploads, "upload")
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn messages(&self, level: NotificationLevel) -> Vec<String> {
        self.all()
            .into_iter()
            .filter(|n| n.level == level)
            .map(|n| n.message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

/// Keeps offered documents in memory instead of writing them out.
#[derive(Default)]
pub struct RecordingSink {
    pub offers: Mutex<Vec<(String, DocumentResponse)>>,
    pub fail: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            offers: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn file_names(&self) -> Vec<String> {
        self.offers
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }
}

#[async_trait]
impl DownloadSink for RecordingSink {
    async fn offer(&self, file_name: &str, document: &DocumentResponse) -> Result<PathBuf> {
        if self.fail {
            return Err(DeskError::io("disk full"));
        }
        self.offers
            .lock()
            .unwrap()
            .push((file_name.to_string(), document.clone()));
        Ok(PathBuf::from("/downloads").join(file_name))
    }
}

pub struct StaticPicker(pub Option<UploadedDocument>);

#[async_trait]
impl ReplacementPicker for StaticPicker {
    async fn pick(&self, _accept: &str) -> Result<Option<UploadedDocument>> {
        Ok(self.0.clone())
    }
}

pub struct FixedConfirmer {
    pub answer: bool,
    pub prompts: Mutex<Vec<String>>,
}

impl FixedConfirmer {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

impl Confirmer for FixedConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
    }
}

/// Session store backed by a single slot, counting every call.
#[derive(Default)]
pub struct MemorySessionStore {
    pub marker: Mutex<Option<String>>,
    pub fail_reads: bool,
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
    pub clears: AtomicUsize,
}

impl MemorySessionStore {
    pub fn with_marker(marker: &str) -> Self {
        Self {
            marker: Mutex::new(Some(marker.to_string())),
            ..Default::default()
        }
    }

    pub fn unreadable() -> Self {
        Self {
            fail_reads: true,
            ..Default::default()
        }
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn read_marker(&self) -> Result<Option<String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads {
            return Err(DeskError::io("storage unavailable"));
        }
        Ok(self.marker.lock().unwrap().clone())
    }

    async fn write_marker(&self, marker: &str) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        *self.marker.lock().unwrap() = Some(marker.to_string());
        Ok(())
    }

    async fn clear_marker(&self) -> Result<()> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        *self.marker.lock().unwrap() = None;
        Ok(())
    }
}
