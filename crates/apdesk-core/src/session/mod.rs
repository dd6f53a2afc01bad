//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: The two-state authentication machine and the login identity
//! - `store`: Persisted session marker storage trait

mod model;
mod store;

pub use model::{SessionState, UserIdentity};
pub use store::{SESSION_MARKER_KEY, SessionStore};
