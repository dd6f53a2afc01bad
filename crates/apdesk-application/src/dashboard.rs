//! Dashboard counters.

use apdesk_core::api::DeskApi;
use apdesk_core::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub clients: usize,
    pub approvals: usize,
    /// Approvals whose PDF has been generated.
    pub documents: usize,
}

impl DashboardStats {
    /// Fetches both lists and counts them.
    pub async fn load(api: &dyn DeskApi) -> Result<Self> {
        let clients = api.list_clients().await?;
        let approvals = api.list_approvals().await?;
        Ok(Self {
            clients: clients.len(),
            approvals: approvals.len(),
            documents: approvals.iter().filter(|a| a.has_document()).count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockApi, client, record};

    #[tokio::test]
    async fn test_load() {
        let api = MockApi::new();
        let mut generated = record(2);
        generated.pdf_path = Some("approvals/2.pdf".to_string());
        api.push_clients(Ok(vec![client(1, "Ada")]))
            .push_approvals(Ok(vec![record(1), generated]));

        let stats = DashboardStats::load(&api).await.unwrap();

        assert_eq!(
            stats,
            DashboardStats {
                clients: 1,
                approvals: 2,
                documents: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_load_propagates_errors() {
        let api = MockApi::new();
        assert!(DashboardStats::load(&api).await.unwrap_err().is_transport());
    }
}
