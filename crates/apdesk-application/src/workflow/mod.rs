//! Approval Workflow Engine.
//!
//! # Module Structure
//!
//! - `state`: Stage states, failure stages and the run report
//! - `engine`: The per-submission state machine

mod engine;
mod state;

pub use engine::{ApprovalWorkflow, load_client_options};
pub use state::{GeneratedDocument, ReplacementOutcome, WorkflowReport, WorkflowStage, WorkflowState};
