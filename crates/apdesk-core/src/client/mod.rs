//! Client domain module.
//!
//! # Module Structure
//!
//! - `model`: Client records as returned by the API, plus form-side types

mod model;

pub use model::{Client, ClientId, ClientOption, NewClient};
