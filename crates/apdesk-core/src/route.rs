//! Console routes and sidebar navigation.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Every screen of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Clients,
    #[strum(to_string = "Send Approval")]
    SendApproval,
    Approvals,
    #[strum(to_string = "Add Client")]
    AddClient,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Clients => "/clients",
            Route::SendApproval => "/send-approval",
            Route::Approvals => "/approvals",
            Route::AddClient => "/add-client",
        }
    }

    /// Protected routes require a session on activation.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }

    /// Sidebar items, in display order.
    pub fn navigation() -> [Route; 4] {
        [
            Route::Dashboard,
            Route::Clients,
            Route::SendApproval,
            Route::Approvals,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Route::SendApproval.path(), "/send-approval");
        assert_eq!(Route::Login.path(), "/");
        assert_eq!(Route::AddClient.path(), "/add-client");
    }

    #[test]
    fn test_protection() {
        assert!(!Route::Login.is_protected());
        assert!(!Route::Register.is_protected());
        assert!(Route::navigation().iter().all(Route::is_protected));
        assert!(Route::AddClient.is_protected());
    }

    #[test]
    fn test_labels() {
        let labels: Vec<String> = Route::navigation().iter().map(|r| r.to_string()).collect();
        assert_eq!(labels, ["Dashboard", "Clients", "Send Approval", "Approvals"]);
    }
}
