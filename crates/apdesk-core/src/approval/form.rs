//! Raw approval form input.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::model::{AccountType, ApprovalRequest};
use crate::client::ClientOption;
use crate::error::{DeskError, Result};

/// What the user has entered on the "send approval" form.
///
/// Client and account type come from closed option sets and may still be
/// unselected; account number and amount are free text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApprovalForm {
    pub client: Option<ClientOption>,
    pub account_type: Option<AccountType>,
    pub account_number: String,
    pub amount: String,
}

impl ApprovalForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(mut self, client: ClientOption) -> Self {
        self.client = Some(client);
        self
    }

    pub fn with_account_type(mut self, account_type: AccountType) -> Self {
        self.account_type = Some(account_type);
        self
    }

    pub fn with_account_number(mut self, account_number: impl Into<String>) -> Self {
        self.account_number = account_number.into();
        self
    }

    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = amount.into();
        self
    }

    /// Turns the form into a request, or reports why it cannot be submitted.
    pub fn validate(&self) -> Result<ApprovalRequest> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| DeskError::validation("Please select a client"))?;
        let account_type = self
            .account_type
            .ok_or_else(|| DeskError::validation("Please select an account type"))?;

        let amount_text = self.amount.trim();
        if amount_text.is_empty() {
            return Err(DeskError::validation("Amount is required"));
        }
        let amount = Decimal::from_str(amount_text)
            .or_else(|_| Decimal::from_scientific(amount_text))
            .map_err(|_| DeskError::validation(format!("Invalid amount: '{}'", amount_text)))?;

        Ok(ApprovalRequest {
            client_id: client.id,
            account_number: self.account_number.clone(),
            account_type,
            amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ClientOption {
        ClientOption {
            id: 7,
            label: "Ada".to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let request = ApprovalForm::new()
            .with_client(client())
            .with_account_type(AccountType::Collateral)
            .with_account_number("ACC-1")
            .with_amount(" 500.50 ")
            .validate()
            .unwrap();
        assert_eq!(request.client_id, 7);
        assert_eq!(request.account_type, AccountType::Collateral);
        assert_eq!(request.amount, Decimal::from_str("500.50").unwrap());
    }

    #[test]
    fn test_missing_client() {
        let err = ApprovalForm::new()
            .with_account_type(AccountType::Settlement)
            .with_amount("1")
            .validate()
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_missing_account_type() {
        let err = ApprovalForm::new()
            .with_client(client())
            .with_amount("1")
            .validate()
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_bad_amount() {
        for amount in ["", "   ", "abc", "12,5"] {
            let err = ApprovalForm::new()
                .with_client(client())
                .with_account_type(AccountType::Operational)
                .with_amount(amount)
                .validate()
                .unwrap_err();
            assert!(err.is_validation(), "amount {:?} should be rejected", amount);
        }
    }
}
