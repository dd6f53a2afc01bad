//! Read-only view of submitted approvals.

use std::sync::Arc;

use apdesk_core::api::DeskApi;
use apdesk_core::approval::ApprovalRecord;
use apdesk_core::error::Result;

pub struct ApprovalBook {
    api: Arc<dyn DeskApi>,
    records: Vec<ApprovalRecord>,
}

impl ApprovalBook {
    pub fn new(api: Arc<dyn DeskApi>) -> Self {
        Self {
            api,
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[ApprovalRecord] {
        &self.records
    }

    /// Re-fetches every approval. The previous list survives a failure.
    pub async fn refresh(&mut self) -> Result<&[ApprovalRecord]> {
        match self.api.list_approvals().await {
            Ok(records) => {
                tracing::debug!("[ApprovalBook] Fetched {} approvals", records.len());
                self.records = records;
                Ok(&self.records)
            }
            Err(err) => {
                tracing::error!("[ApprovalBook] Error fetching approvals: {}", err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockApi, record};
    use apdesk_core::approval::ClientSummary;

    #[tokio::test]
    async fn test_refresh() {
        let api = Arc::new(MockApi::new());
        let mut with_pdf = record(2);
        with_pdf.pdf_path = Some("approvals/2.pdf".to_string());
        with_pdf.client = Some(ClientSummary {
            manager: Some("Ada".to_string()),
        });
        api.push_approvals(Ok(vec![record(1), with_pdf]));
        let mut book = ApprovalBook::new(api.clone());

        assert_eq!(book.refresh().await.unwrap().len(), 2);
        let labels: Vec<&str> = book.records().iter().map(|r| r.manager_label()).collect();
        assert_eq!(labels, ["N/A", "Ada"]);

        assert!(book.refresh().await.is_err());
        assert_eq!(book.records().len(), 2);
    }
}
