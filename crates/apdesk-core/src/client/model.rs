//! Client domain models.

use serde::{Deserialize, Serialize};

use crate::document::UploadedDocument;

/// Identifier assigned to a client by the remote API.
pub type ClientId = u64;

/// A managed business entity as returned by `GET /all-clients`.
///
/// The API owns these records; the console only holds transient copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub manager: String,
    #[serde(default)]
    pub directors_name: String,
    #[serde(default)]
    pub address: String,
    /// Stored path of the uploaded letterhead, if any.
    #[serde(default, alias = "letter_head_path")]
    pub letter_head: Option<String>,
    /// Stored path of the uploaded signature, if any.
    #[serde(default, alias = "signature_path")]
    pub signature: Option<String>,
}

/// An entry of the client selector on the approval form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientOption {
    pub id: ClientId,
    pub label: String,
}

impl From<&Client> for ClientOption {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            label: client.manager.clone(),
        }
    }
}

/// Input for `POST /clients`.
#[derive(Debug, Clone, Default)]
pub struct NewClient {
    pub manager: String,
    pub directors_name: String,
    pub address: String,
    pub letter_head: Option<UploadedDocument>,
    pub signature: Option<UploadedDocument>,
}

impl NewClient {
    pub fn new(
        manager: impl Into<String>,
        directors_name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            manager: manager.into(),
            directors_name: directors_name.into(),
            address: address.into(),
            letter_head: None,
            signature: None,
        }
    }

    pub fn with_letter_head(mut self, document: UploadedDocument) -> Self {
        self.letter_head = Some(document);
        self
    }

    pub fn with_signature(mut self, document: UploadedDocument) -> Self {
        self.signature = Some(document);
        self
    }

    /// Number of file attachments carried by this request (0..=2).
    pub fn attachment_count(&self) -> usize {
        usize::from(self.letter_head.is_some()) + usize::from(self.signature.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_path_aliases() {
        let json = r#"{
            "id": 3,
            "manager": "Ada",
            "directors_name": "Grace",
            "address": "1 Main St",
            "letter_head_path": "letterheads/3.pdf",
            "signature_path": null
        }"#;
        let client: Client = serde_json::from_str(json).unwrap();
        assert_eq!(client.id, 3);
        assert_eq!(client.letter_head.as_deref(), Some("letterheads/3.pdf"));
        assert!(client.signature.is_none());
    }

    #[test]
    fn test_client_option_uses_manager_as_label() {
        let client = Client {
            id: 7,
            manager: "Ada".to_string(),
            directors_name: String::new(),
            address: String::new(),
            letter_head: None,
            signature: None,
        };
        let option = ClientOption::from(&client);
        assert_eq!(option.id, 7);
        assert_eq!(option.label, "Ada");
    }

    #[test]
    fn test_attachment_count() {
        let doc = UploadedDocument::new("sig.png", "image/png", vec![1, 2, 3]);
        let client = NewClient::new("Ada", "Grace", "1 Main St").with_signature(doc);
        assert_eq!(client.attachment_count(), 1);
    }
}
