//! Session marker storage trait.

use async_trait::async_trait;

use crate::error::Result;

/// Fixed key under which the session marker is persisted.
pub const SESSION_MARKER_KEY: &str = "user";

/// Persisted storage for the session marker.
///
/// Implementations keep a single value under [`SESSION_MARKER_KEY`]; its
/// absence means nobody is logged in.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Reads the marker.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(marker))`: A session is persisted
    /// - `Ok(None)`: No session
    /// - `Err(_)`: The storage could not be read
    async fn read_marker(&self) -> Result<Option<String>>;

    /// Persists the marker, replacing any previous one.
    async fn write_marker(&self, marker: &str) -> Result<()>;

    /// Removes the marker. Removing a missing marker is not an error.
    async fn clear_marker(&self) -> Result<()>;
}
