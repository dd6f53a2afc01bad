//! Application layer for APDESK.
//!
//! Use cases that sit between the domain traits of `apdesk-core` and the
//! concrete collaborators wired up by the console: the session guard, the
//! approval workflow, and the client and approval lists.

pub mod approval_book;
pub mod dashboard;
pub mod roster;
pub mod session_guard;
pub mod workflow;

#[cfg(test)]
mod test_support;

pub use approval_book::ApprovalBook;
pub use dashboard::DashboardStats;
pub use roster::{ClientRoster, DeleteOutcome};
pub use session_guard::{SessionGuard, ViewGate};
pub use workflow::{ApprovalWorkflow, ReplacementOutcome, WorkflowReport, WorkflowState};
