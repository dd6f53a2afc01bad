//! ApprovalWorkflow - one run of submit, generate and optional replace.

use std::sync::Arc;

use apdesk_core::api::DeskApi;
use apdesk_core::approval::{ApprovalForm, ApprovalId, ApprovalRecord};
use apdesk_core::client::ClientOption;
use apdesk_core::config::WorkflowConfig;
use apdesk_core::document::{DownloadSink, PDF_CONTENT_TYPE, ReplacementPicker, UploadedDocument};
use apdesk_core::error::{DeskError, Result};
use apdesk_core::notification::{Notification, Notifier};
use tracing::Instrument;
use uuid::Uuid;

use super::state::{
    GeneratedDocument, ReplacementOutcome, WorkflowReport, WorkflowStage, WorkflowState,
};

const UNKNOWN_ERROR: &str = "Unknown error";

/// A short-lived state machine driving one approval submission.
///
/// Stages run strictly one after another. Calling a stage out of order
/// returns [`DeskError::InvalidTransition`] without touching any
/// collaborator. Nothing is retried: a failed stage is terminal for the
/// instance.
pub struct ApprovalWorkflow {
    instance_id: Uuid,
    api: Arc<dyn DeskApi>,
    notifier: Arc<dyn Notifier>,
    sink: Arc<dyn DownloadSink>,
    settings: WorkflowConfig,
    state: WorkflowState,
    record: Option<ApprovalRecord>,
    document: Option<GeneratedDocument>,
}

impl ApprovalWorkflow {
    pub fn new(
        api: Arc<dyn DeskApi>,
        notifier: Arc<dyn Notifier>,
        sink: Arc<dyn DownloadSink>,
        settings: WorkflowConfig,
    ) -> Self {
        Self {
            instance_id: Uuid::new_v4(),
            api,
            notifier,
            sink,
            settings,
            state: WorkflowState::Idle,
            record: None,
            document: None,
        }
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// The approval created by [`submit`](Self::submit), once it succeeded.
    pub fn record(&self) -> Option<&ApprovalRecord> {
        self.record.as_ref()
    }

    pub fn document(&self) -> Option<&GeneratedDocument> {
        self.document.as_ref()
    }

    /// Validates the form and creates the approval.
    ///
    /// Validation problems are notified and leave the instance in `Idle`
    /// so the form can be corrected; no call is made. A failed create call
    /// moves the instance to `Failed(Submit)`.
    pub async fn submit(&mut self, form: &ApprovalForm) -> Result<ApprovalRecord> {
        self.expect_state(WorkflowState::Idle, "submit")?;

        let request = match form.validate() {
            Ok(request) => request,
            Err(err) => {
                let message = match &err {
                    DeskError::Validation(message) => message.clone(),
                    other => other.to_string(),
                };
                tracing::warn!(instance = %self.instance_id, "[ApprovalWorkflow] Rejected form: {}", message);
                self.notifier.notify(Notification::error(message));
                return Err(err);
            }
        };

        self.state = WorkflowState::Submitting;
        match self.api.create_approval(&request).await {
            Ok(record) => {
                tracing::info!(
                    instance = %self.instance_id,
                    "[ApprovalWorkflow] Approval {} saved for client {}",
                    record.id,
                    request.client_id
                );
                self.state = WorkflowState::Submitted;
                self.record = Some(record.clone());
                self.notifier
                    .notify(Notification::success("Approval saved successfully"));
                Ok(record)
            }
            Err(err) => {
                tracing::error!(instance = %self.instance_id, "[ApprovalWorkflow] Failed to save approval: {}", err);
                self.state = WorkflowState::Failed(WorkflowStage::Submit);
                self.notifier
                    .notify(Notification::error("Failed to save approval"));
                Err(err)
            }
        }
    }

    /// Fetches the generated document and offers it for download.
    ///
    /// Success is decided by the declared content type, not the status: a
    /// non-PDF body is an error payload whose `message` is shown to the
    /// user. On success the instance moves on to `AwaitingReplacement`.
    /// An `approval_id` other than the submitted record is rejected before
    /// any call.
    pub async fn generate_document(&mut self, approval_id: ApprovalId) -> Result<GeneratedDocument> {
        self.expect_state(WorkflowState::Submitted, "generate document")?;
        self.expect_own_record(approval_id)?;
        self.state = WorkflowState::GeneratingDocument;

        let response = match self.api.fetch_approval_pdf(approval_id).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(instance = %self.instance_id, "[ApprovalWorkflow] Failed to fetch PDF for {}: {}", approval_id, err);
                self.state = WorkflowState::Failed(WorkflowStage::Generate);
                self.notifier
                    .notify(Notification::error("Failed to generate PDF"));
                return Err(err);
            }
        };

        if !response.is_pdf() {
            let message = response
                .error_message()
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
            tracing::error!(
                instance = %self.instance_id,
                "[ApprovalWorkflow] PDF generation for {} returned {:?}: {}",
                approval_id,
                response.content_type,
                message
            );
            self.state = WorkflowState::Failed(WorkflowStage::Generate);
            self.notifier.notify(Notification::error(format!(
                "Failed to generate PDF: {}",
                message
            )));
            return Err(DeskError::application(message));
        }

        self.state = WorkflowState::DocumentReady;
        let file_name = self.settings.document_file_name.clone();
        let path = match self.sink.offer(&file_name, &response).await {
            Ok(path) => path,
            Err(err) => {
                tracing::error!(instance = %self.instance_id, "[ApprovalWorkflow] Failed to save {}: {}", file_name, err);
                self.state = WorkflowState::Failed(WorkflowStage::Generate);
                self.notifier.notify(Notification::error(format!(
                    "Failed to save {}: {}",
                    file_name, err
                )));
                return Err(err);
            }
        };

        let document = GeneratedDocument {
            file_name,
            path,
            size: response.bytes.len() as u64,
        };
        tracing::info!(
            instance = %self.instance_id,
            "[ApprovalWorkflow] Document for {} saved to {}",
            approval_id,
            document.path.display()
        );
        self.document = Some(document.clone());
        self.state = WorkflowState::AwaitingReplacement;
        Ok(document)
    }

    /// Lets the user pick an edited PDF and uploads it.
    ///
    /// Declining leaves the instance parked in `AwaitingReplacement`.
    ///
    /// # Errors
    ///
    /// Returns an error if called out of order or if the picker itself
    /// fails; the instance state is unchanged in both cases.
    pub async fn offer_replacement_upload(
        &mut self,
        picker: &dyn ReplacementPicker,
    ) -> Result<ReplacementOutcome> {
        self.expect_state(WorkflowState::AwaitingReplacement, "offer replacement upload")?;
        let approval_id = self.approval_id()?;

        match picker.pick(PDF_CONTENT_TYPE).await? {
            Some(file) => self.upload_replacement(approval_id, file).await,
            None => {
                tracing::info!(instance = %self.instance_id, "[ApprovalWorkflow] No replacement picked for {}", approval_id);
                Ok(ReplacementOutcome::Declined)
            }
        }
    }

    /// Uploads `file` as the replacement document of `approval_id`.
    ///
    /// `approval_id` must be the record this instance created.
    ///
    /// Both outcomes complete the instance. A failed upload is only logged
    /// unless `notify_upload_failure` is set; the delivered document stays
    /// valid either way.
    pub async fn upload_replacement(
        &mut self,
        approval_id: ApprovalId,
        file: UploadedDocument,
    ) -> Result<ReplacementOutcome> {
        self.expect_state(WorkflowState::AwaitingReplacement, "upload replacement")?;
        self.expect_own_record(approval_id)?;

        let outcome = match self.api.upload_approval_pdf(approval_id, &file).await {
            Ok(()) => {
                tracing::info!(
                    instance = %self.instance_id,
                    "[ApprovalWorkflow] Uploaded {} ({} bytes) for {}",
                    file.file_name,
                    file.size(),
                    approval_id
                );
                self.notifier
                    .notify(Notification::success("Edited PDF uploaded successfully"));
                ReplacementOutcome::Uploaded
            }
            Err(err) => {
                tracing::error!(instance = %self.instance_id, "[ApprovalWorkflow] Error uploading edited PDF for {}: {}", approval_id, err);
                if self.settings.notify_upload_failure {
                    self.notifier
                        .notify(Notification::error("Failed to upload edited PDF"));
                }
                ReplacementOutcome::Failed
            }
        };

        self.state = WorkflowState::Complete;
        Ok(outcome)
    }

    /// Drives every stage in order and reports where the instance ended.
    ///
    /// Stage failures have already been notified and show up in the
    /// report's final state. A failing picker is notified and ends the run
    /// in `AwaitingReplacement`.
    ///
    /// # Errors
    ///
    /// Only when the instance was not `Idle` to begin with.
    pub async fn run(
        &mut self,
        form: &ApprovalForm,
        picker: &dyn ReplacementPicker,
    ) -> Result<WorkflowReport> {
        self.expect_state(WorkflowState::Idle, "run")?;
        let span = tracing::info_span!("approval_workflow", instance_id = %self.instance_id);

        async {
            let mut replacement = None;
            if let Ok(record) = self.submit(form).await {
                if self.generate_document(record.id).await.is_ok() {
                    match self.offer_replacement_upload(picker).await {
                        Ok(outcome) => replacement = Some(outcome),
                        Err(err) => {
                            tracing::warn!("[ApprovalWorkflow] Replacement selection failed: {}", err);
                            self.notifier.notify(Notification::error(err.to_string()));
                        }
                    }
                }
            }

            Ok(WorkflowReport {
                final_state: self.state,
                record: self.record.clone(),
                document: self.document.clone(),
                replacement,
            })
        }
        .instrument(span)
        .await
    }

    fn approval_id(&self) -> Result<ApprovalId> {
        self.record
            .as_ref()
            .map(|record| record.id)
            .ok_or_else(|| DeskError::internal("Workflow has no approval record"))
    }

    fn expect_own_record(&self, approval_id: ApprovalId) -> Result<()> {
        let own_id = self.approval_id()?;
        if approval_id != own_id {
            tracing::warn!(
                instance = %self.instance_id,
                "[ApprovalWorkflow] Refused approval {}, instance owns {}",
                approval_id,
                own_id
            );
            return Err(DeskError::validation(format!(
                "Approval {} does not belong to this workflow (expected {})",
                approval_id, own_id
            )));
        }
        Ok(())
    }

    fn expect_state(&self, expected: WorkflowState, action: &str) -> Result<()> {
        if self.state != expected {
            return Err(DeskError::invalid_transition(self.state.to_string(), action));
        }
        Ok(())
    }
}

/// Fetches the client selector options for the approval form.
///
/// A failure is notified and yields an empty list.
pub async fn load_client_options(api: &dyn DeskApi, notifier: &dyn Notifier) -> Vec<ClientOption> {
    match api.list_clients().await {
        Ok(clients) => clients.iter().map(ClientOption::from).collect(),
        Err(err) => {
            tracing::error!("[ApprovalWorkflow] Error fetching clients: {}", err);
            notifier.notify(Notification::error("Failed to fetch clients"));
            Vec::new()
        }
    }
}
