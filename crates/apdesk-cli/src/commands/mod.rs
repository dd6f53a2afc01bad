pub mod approvals;
pub mod clients;
pub mod dashboard;
pub mod session;
