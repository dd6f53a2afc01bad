//! Approval domain module.
//!
//! # Module Structure
//!
//! - `model`: Account types, submitted requests and stored records
//! - `form`: Raw form input and its validation into a request

mod form;
mod model;

pub use form::ApprovalForm;
pub use model::{AccountType, ApprovalId, ApprovalRecord, ApprovalRequest, ClientSummary};
