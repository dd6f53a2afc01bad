pub mod api;
pub mod approval;
pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod format;
pub mod notification;
pub mod route;
pub mod session;

// Re-export common error type
pub use error::DeskError;
