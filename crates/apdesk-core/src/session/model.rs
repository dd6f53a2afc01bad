//! Session domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authentication state observed by the navigation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Authenticated,
    Anonymous,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated)
    }
}

/// Identity written into the session marker on login.
///
/// The guard treats the serialized form as opaque; this type only exists so
/// the console can show who is logged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub name: String,
    pub logged_in_at: DateTime<Utc>,
}

impl UserIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            logged_in_at: Utc::now(),
        }
    }

    /// Serialized blob stored under the session marker key.
    pub fn to_marker(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Best-effort decoding of a marker written by [`UserIdentity::to_marker`].
    pub fn from_marker(marker: &str) -> Option<Self> {
        serde_json::from_str(marker).ok()
    }
}
