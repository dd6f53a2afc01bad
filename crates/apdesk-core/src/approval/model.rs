//! Approval domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::client::ClientId;

/// Identifier assigned to an approval by the remote API.
pub type ApprovalId = u64;

/// Kind of account an approval is requested for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum AccountType {
    Collateral,
    Settlement,
    Operational,
}

/// A validated approval request, ready for `POST /approvals`.
///
/// Built client-side from an [`ApprovalForm`](super::ApprovalForm) and never
/// modified after submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApprovalRequest {
    pub client_id: ClientId,
    pub account_number: String,
    pub account_type: AccountType,
    /// Sent as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Minimal client data embedded in approval list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSummary {
    #[serde(default)]
    pub manager: Option<String>,
}

/// An approval as stored by the remote API.
///
/// `pdf_path` stays empty until the API has generated the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRecord {
    pub id: ApprovalId,
    #[serde(default)]
    pub client_id: Option<ClientId>,
    #[serde(default)]
    pub account_type: Option<AccountType>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub pdf_path: Option<String>,
    #[serde(default)]
    pub client: Option<ClientSummary>,
}

impl ApprovalRecord {
    /// File name used when saving the stored PDF of this approval.
    pub fn archive_file_name(&self) -> String {
        format!("approval_{}.pdf", self.id)
    }

    /// Manager of the embedded client, or `N/A` when the API omitted it.
    pub fn manager_label(&self) -> &str {
        self.client
            .as_ref()
            .and_then(|c| c.manager.as_deref())
            .unwrap_or("N/A")
    }

    pub fn has_document(&self) -> bool {
        self.pdf_path.as_deref().is_some_and(|p| !p.is_empty())
    }
}
