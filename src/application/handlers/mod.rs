//! Command and query handlers, one file per operation.

pub mod dysfunction;
pub mod session;
