//! User-facing notifications and confirmations.

use serde::{Deserialize, Serialize};

/// Severity of a notification.
///
/// `Alert` is blocking: the user has to acknowledge it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
    Alert,
}

/// A transient message surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn alert(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Alert,
            message: message.into(),
        }
    }
}

/// Surfaces notifications to the user (toasts, terminal lines, ...).
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Asks the user a yes/no question before a destructive call.
pub trait Confirmer: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}
