//! Domain layer - pure business logic with no infrastructure concerns.

pub mod dysfunction;
pub mod foundation;
pub mod session;
pub mod statistics;
pub mod taxonomy;
