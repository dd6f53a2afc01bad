//! Workflow states.

use std::fmt;
use std::path::PathBuf;

use apdesk_core::approval::ApprovalRecord;

/// Stage at which a workflow instance failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStage {
    Submit,
    Generate,
}

/// Position of one workflow instance in its stage sequence.
///
/// `Failed` is terminal. `AwaitingReplacement` may last forever: the user
/// is never forced to pick a replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Submitting,
    Submitted,
    GeneratingDocument,
    DocumentReady,
    AwaitingReplacement,
    Complete,
    Failed(WorkflowStage),
}

impl WorkflowState {
    /// True once the generated document has been delivered.
    ///
    /// A later replacement upload cannot take this back.
    pub fn document_delivered(&self) -> bool {
        matches!(
            self,
            WorkflowState::DocumentReady
                | WorkflowState::AwaitingReplacement
                | WorkflowState::Complete
        )
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowState::Idle => write!(f, "idle"),
            WorkflowState::Submitting => write!(f, "submitting"),
            WorkflowState::Submitted => write!(f, "submitted"),
            WorkflowState::GeneratingDocument => write!(f, "generating document"),
            WorkflowState::DocumentReady => write!(f, "document ready"),
            WorkflowState::AwaitingReplacement => write!(f, "awaiting replacement"),
            WorkflowState::Complete => write!(f, "complete"),
            WorkflowState::Failed(WorkflowStage::Submit) => write!(f, "failed at submit"),
            WorkflowState::Failed(WorkflowStage::Generate) => write!(f, "failed at generate"),
        }
    }
}

/// What happened to the optional replacement upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementOutcome {
    /// No file was picked; the instance stays in AwaitingReplacement.
    Declined,
    Uploaded,
    /// The upload call failed. Logged, and not surfaced unless configured.
    Failed,
}

/// The generated document as it was handed to the download sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub file_name: String,
    pub path: PathBuf,
    pub size: u64,
}

/// Summary of a full [`run`](super::ApprovalWorkflow::run).
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowReport {
    pub final_state: WorkflowState,
    pub record: Option<ApprovalRecord>,
    pub document: Option<GeneratedDocument>,
    pub replacement: Option<ReplacementOutcome>,
}

impl WorkflowReport {
    pub fn succeeded(&self) -> bool {
        self.final_state.document_delivered()
    }
}
