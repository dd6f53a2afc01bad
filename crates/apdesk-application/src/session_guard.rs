//! Session Guard - process-wide authentication state.
//!
//! The guard owns the only writable copy of [`SessionState`]. It is created
//! once at startup with [`SessionGuard::init`], mutated only by
//! [`login`](SessionGuard::login) and [`logout`](SessionGuard::logout), and
//! observed through [`state`](SessionGuard::state) or a
//! [`subscribe`](SessionGuard::subscribe)d watch receiver.

use std::sync::Arc;

use apdesk_core::error::{DeskError, Result};
use apdesk_core::route::Route;
use apdesk_core::session::{SessionState, SessionStore, UserIdentity};
use tokio::sync::watch;

/// Outcome of activating a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewGate {
    /// The view may render.
    Granted(Route),
    /// The view must not render; navigate to the given route instead.
    Redirect(Route),
}

impl ViewGate {
    pub fn is_granted(&self) -> bool {
        matches!(self, ViewGate::Granted(_))
    }

    /// The granted route, or [`DeskError::SessionExpired`] for a redirect.
    pub fn into_result(self) -> Result<Route> {
        match self {
            ViewGate::Granted(route) => Ok(route),
            ViewGate::Redirect(_) => Err(DeskError::SessionExpired),
        }
    }
}

/// Gate for protected views, backed by a persisted session marker.
pub struct SessionGuard {
    store: Arc<dyn SessionStore>,
    state_tx: watch::Sender<SessionState>,
}

impl SessionGuard {
    /// Creates the guard and derives the initial state from the store.
    ///
    /// An unreadable store starts the guard as [`SessionState::Anonymous`].
    pub async fn init(store: Arc<dyn SessionStore>) -> Self {
        let initial = match store.read_marker().await {
            Ok(Some(_)) => SessionState::Authenticated,
            Ok(None) => SessionState::Anonymous,
            Err(e) => {
                tracing::warn!("[SessionGuard] Failed to read session marker at startup: {}", e);
                SessionState::Anonymous
            }
        };
        tracing::debug!("[SessionGuard] Initial state: {:?}", initial);

        let (state_tx, _) = watch::channel(initial);
        Self { store, state_tx }
    }

    pub fn state(&self) -> SessionState {
        *self.state_tx.borrow()
    }

    /// Returns a receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// Persists the identity as the session marker and becomes Authenticated.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker cannot be serialized or written; the
    /// state is left unchanged in that case.
    pub async fn login(&self, identity: &UserIdentity) -> Result<()> {
        let marker = identity.to_marker()?;
        self.store.write_marker(&marker).await?;
        self.set_state(SessionState::Authenticated);
        tracing::info!("[SessionGuard] Logged in as {}", identity.name);
        Ok(())
    }

    /// Re-reads the persisted marker.
    ///
    /// A missing marker, or a store that cannot be read, is handled by
    /// logging out once. Never fails.
    pub async fn check_session(&self) -> SessionState {
        match self.store.read_marker().await {
            Ok(Some(_)) => {
                self.set_state(SessionState::Authenticated);
                SessionState::Authenticated
            }
            Ok(None) => {
                tracing::warn!("[SessionGuard] No session marker found, logging out");
                self.logout().await;
                SessionState::Anonymous
            }
            Err(e) => {
                tracing::warn!("[SessionGuard] Session marker unreadable ({}), logging out", e);
                self.logout().await;
                SessionState::Anonymous
            }
        }
    }

    /// Clears the persisted marker and becomes Anonymous. Idempotent.
    pub async fn logout(&self) {
        if let Err(e) = self.store.clear_marker().await {
            tracing::error!("[SessionGuard] Failed to clear session marker: {}", e);
        }
        self.set_state(SessionState::Anonymous);
        tracing::debug!("[SessionGuard] Logged out");
    }

    /// Activation-time check for a view.
    ///
    /// Protected routes run [`check_session`](Self::check_session) exactly
    /// once; public routes are granted without touching the store.
    pub async fn activate(&self, route: Route) -> ViewGate {
        if !route.is_protected() {
            return ViewGate::Granted(route);
        }
        match self.check_session().await {
            SessionState::Authenticated => ViewGate::Granted(route),
            SessionState::Anonymous => {
                tracing::info!("[SessionGuard] Redirecting {} to login", route.path());
                ViewGate::Redirect(Route::Login)
            }
        }
    }

    /// Decodes the identity stored in the marker, if it is one we wrote.
    pub async fn current_user(&self) -> Option<UserIdentity> {
        match self.store.read_marker().await {
            Ok(Some(marker)) => UserIdentity::from_marker(&marker),
            Ok(None) => None,
            Err(e) => {
                tracing::debug!("[SessionGuard] Cannot read identity: {}", e);
                None
            }
        }
    }

    fn set_state(&self, state: SessionState) {
        self.state_tx.send_if_modified(|current| {
            if *current == state {
                return false;
            }
            *current = state;
            true
        });
    }
}
