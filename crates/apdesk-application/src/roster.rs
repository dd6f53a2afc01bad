//! Client roster: the console's transient copy of the client list.

use std::path::PathBuf;
use std::sync::Arc;

use apdesk_core::api::DeskApi;
use apdesk_core::client::{Client, ClientId, NewClient};
use apdesk_core::document::{DownloadSink, FileKind};
use apdesk_core::error::Result;
use apdesk_core::notification::{Confirmer, Notification, Notifier};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this client?";

/// Result of [`ClientRoster::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined; no call was made.
    Cancelled,
    Failed,
}

/// Client list operations over the remote API.
///
/// The local list only changes after the API confirmed a change.
pub struct ClientRoster {
    api: Arc<dyn DeskApi>,
    notifier: Arc<dyn Notifier>,
    sink: Arc<dyn DownloadSink>,
    clients: Vec<Client>,
}

impl ClientRoster {
    pub fn new(api: Arc<dyn DeskApi>, notifier: Arc<dyn Notifier>, sink: Arc<dyn DownloadSink>) -> Self {
        Self {
            api,
            notifier,
            sink,
            clients: Vec::new(),
        }
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Re-fetches the full list. On failure the current list is kept.
    pub async fn refresh(&mut self) -> Result<&[Client]> {
        match self.api.list_clients().await {
            Ok(clients) => {
                tracing::debug!("[ClientRoster] Fetched {} clients", clients.len());
                self.clients = clients;
                Ok(&self.clients)
            }
            Err(err) => {
                tracing::error!("[ClientRoster] Error fetching clients: {}", err);
                Err(err)
            }
        }
    }

    /// Creates a client, then re-fetches the list.
    ///
    /// # Errors
    ///
    /// Returns the create error; it is logged but not notified. A failing
    /// re-fetch after a successful create is logged and ignored.
    pub async fn create(&mut self, new_client: &NewClient) -> Result<Client> {
        let created = match self.api.create_client(new_client).await {
            Ok(created) => created,
            Err(err) => {
                tracing::error!("[ClientRoster] Error adding client {}: {}", new_client.manager, err);
                return Err(err);
            }
        };

        tracing::info!(
            "[ClientRoster] Client {} added with {} attachment(s)",
            created.id,
            new_client.attachment_count()
        );
        self.notifier
            .notify(Notification::success("Client added successfully!"));

        if let Err(err) = self.refresh().await {
            tracing::warn!("[ClientRoster] Refresh after create failed: {}", err);
        }
        Ok(created)
    }

    /// Deletes a client after confirmation.
    ///
    /// The entry is removed locally only once the API accepted the delete.
    /// A failed call raises an alert and leaves the list untouched.
    pub async fn delete(&mut self, id: ClientId, confirmer: &dyn Confirmer) -> DeleteOutcome {
        if !confirmer.confirm(DELETE_PROMPT) {
            tracing::debug!("[ClientRoster] Delete of {} cancelled", id);
            return DeleteOutcome::Cancelled;
        }

        match self.api.delete_client(id).await {
            Ok(()) => {
                self.clients.retain(|c| c.id != id);
                tracing::info!("[ClientRoster] Client {} deleted", id);
                DeleteOutcome::Deleted
            }
            Err(err) => {
                tracing::error!("[ClientRoster] Error deleting client {}: {}", id, err);
                self.notifier.notify(Notification::alert(
                    "Failed to delete the client. Please try again.",
                ));
                DeleteOutcome::Failed
            }
        }
    }

    /// Downloads a stored client artifact.
    ///
    /// `file_name` defaults to `{kind}_{id}.{ext}` with the extension taken
    /// from the response. Failures are logged only.
    pub async fn download(
        &self,
        kind: FileKind,
        id: ClientId,
        file_name: Option<&str>,
    ) -> Option<PathBuf> {
        let document = match self.api.download_file(kind, id).await {
            Ok(document) => document,
            Err(err) => {
                tracing::error!("[ClientRoster] Error downloading {} for {}: {}", kind, id, err);
                return None;
            }
        };

        let file_name = match file_name {
            Some(name) => name.to_string(),
            None => {
                let extension = document
                    .media_type()
                    .as_deref()
                    .and_then(extension_for)
                    .unwrap_or_else(|| kind.fallback_extension());
                format!("{}_{}.{}", kind, id, extension)
            }
        };

        match self.sink.offer(&file_name, &document).await {
            Ok(path) => Some(path),
            Err(err) => {
                tracing::error!("[ClientRoster] Error saving {}: {}", file_name, err);
                None
            }
        }
    }
}

const PREFERRED_EXTENSIONS: [&str; 4] = ["pdf", "png", "jpg", "svg"];

/// File extension for a media type; `None` for unknown or untyped bodies.
fn extension_for(media_type: &str) -> Option<&'static str> {
    if media_type == "application/octet-stream" {
        return None;
    }
    let extensions = mime_guess::get_mime_extensions_str(media_type)?;
    PREFERRED_EXTENSIONS
        .iter()
        .find_map(|preferred| extensions.iter().copied().find(|ext| ext == preferred))
        .or_else(|| extensions.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FixedConfirmer, MockApi, RecordingNotifier, RecordingSink, client};
    use apdesk_core::DeskError;
    use apdesk_core::document::DocumentResponse;
    use apdesk_core::notification::NotificationLevel;

    struct Fixture {
        api: Arc<MockApi>,
        notifier: Arc<RecordingNotifier>,
        sink: Arc<RecordingSink>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                api: Arc::new(MockApi::new()),
                notifier: Arc::new(RecordingNotifier::default()),
                sink: Arc::new(RecordingSink::default()),
            }
        }

        async fn loaded_roster(&self) -> ClientRoster {
            self.api
                .push_clients(Ok(vec![client(1, "Ada"), client(2, "Grace"), client(3, "Linus")]));
            let mut roster =
                ClientRoster::new(self.api.clone(), self.notifier.clone(), self.sink.clone());
            roster.refresh().await.unwrap();
            roster
        }
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_list() {
        let fixture = Fixture::new();
        let mut roster = fixture.loaded_roster().await;

        assert!(roster.refresh().await.is_err());
        assert_eq!(roster.clients().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_roster_unchanged() {
        let fixture = Fixture::new();
        fixture
            .api
            .push_deletion(Err(DeskError::http_status(500, "db locked")));
        let mut roster = fixture.loaded_roster().await;
        let before = roster.clients().to_vec();

        let outcome = roster.delete(2, &FixedConfirmer::new(true)).await;

        assert_eq!(outcome, DeleteOutcome::Failed);
        assert_eq!(roster.clients(), before.as_slice());
        assert_eq!(
            fixture.notifier.messages(NotificationLevel::Alert),
            ["Failed to delete the client. Please try again."]
        );
    }

    #[tokio::test]
    async fn test_delete_removes_after_success() {
        let fixture = Fixture::new();
        fixture.api.push_deletion(Ok(()));
        let mut roster = fixture.loaded_roster().await;
        let confirmer = FixedConfirmer::new(true);

        assert_eq!(roster.delete(2, &confirmer).await, DeleteOutcome::Deleted);

        let ids: Vec<ClientId> = roster.clients().iter().map(|c| c.id).collect();
        assert_eq!(ids, [1, 3]);
        assert_eq!(*confirmer.prompts.lock().unwrap(), [DELETE_PROMPT]);
    }

    #[tokio::test]
    async fn test_declined_delete_makes_no_call() {
        let fixture = Fixture::new();
        let mut roster = fixture.loaded_roster().await;

        let outcome = roster.delete(1, &FixedConfirmer::new(false)).await;

        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(fixture.api.calls(), ["list_clients"]);
        assert_eq!(roster.clients().len(), 3);
    }

    #[tokio::test]
    async fn test_create_refetches_and_notifies() {
        let fixture = Fixture::new();
        let mut roster = fixture.loaded_roster().await;
        fixture
            .api
            .push_created_client(Ok(client(4, "Barbara")))
            .push_clients(Ok(vec![
                client(1, "Ada"),
                client(2, "Grace"),
                client(3, "Linus"),
                client(4, "Barbara"),
            ]));

        let created = roster
            .create(&NewClient::new("Barbara", "B. Liskov", "MIT"))
            .await
            .unwrap();

        assert_eq!(created.id, 4);
        assert_eq!(roster.clients().len(), 4);
        assert_eq!(
            fixture.api.calls(),
            ["list_clients", "create_client:Barbara", "list_clients"]
        );
        assert_eq!(
            fixture.notifier.messages(NotificationLevel::Success),
            ["Client added successfully!"]
        );
    }

    #[tokio::test]
    async fn test_create_failure_is_not_notified() {
        let fixture = Fixture::new();
        let mut roster = fixture.loaded_roster().await;
        fixture
            .api
            .push_created_client(Err(DeskError::http_status(422, "manager required")));

        let err = roster.create(&NewClient::new("", "", "")).await.unwrap_err();

        assert_eq!(err.status(), Some(422));
        assert!(fixture.notifier.all().is_empty());
        assert_eq!(roster.clients().len(), 3);
    }

    #[test]
    fn test_extension_for() {
        assert_eq!(extension_for("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for("image/png"), Some("png"));
        assert_eq!(extension_for("application/pdf"), Some("pdf"));
        assert_eq!(extension_for("application/octet-stream"), None);
        assert_eq!(extension_for("application/x-not-a-type"), None);
    }

    #[tokio::test]
    async fn test_download_names() {
        let fixture = Fixture::new();
        fixture
            .api
            .push_download(Ok(DocumentResponse::new(Some("image/jpeg"), vec![1])))
            .push_download(Ok(DocumentResponse::new(None, vec![2])))
            .push_download(Ok(DocumentResponse::new(Some("application/pdf"), vec![3])));
        let roster = ClientRoster::new(fixture.api.clone(), fixture.notifier.clone(), fixture.sink.clone());

        roster.download(FileKind::Signature, 5, None).await.unwrap();
        roster.download(FileKind::Signature, 6, None).await.unwrap();
        let path = roster
            .download(FileKind::LetterHead, 5, Some("head.pdf"))
            .await
            .unwrap();

        assert!(path.ends_with("head.pdf"));
        assert_eq!(
            fixture.sink.file_names(),
            ["signature_5.jpg", "signature_6.png", "head.pdf"]
        );
    }

    #[tokio::test]
    async fn test_download_failure_is_logged_only() {
        let fixture = Fixture::new();
        let roster = ClientRoster::new(fixture.api.clone(), fixture.notifier.clone(), fixture.sink.clone());

        assert!(roster.download(FileKind::LetterHead, 9, None).await.is_none());
        assert!(fixture.notifier.all().is_empty());
        assert!(fixture.sink.file_names().is_empty());
    }
}
