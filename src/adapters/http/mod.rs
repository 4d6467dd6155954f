//! HTTP adapters - REST API implementations.
//!
//! Each resource has its own dto/handlers/routes triple; cross-cutting
//! concerns (authentication, error payloads) live alongside them.

pub mod app;
pub mod dysfunction;
pub mod error;
pub mod middleware;
mod patch;
pub mod session;

pub use app::api_router;
pub use dysfunction::{dysfunction_routes, DysfunctionHandlers};
pub use error::ErrorResponse;
pub use session::{session_routes, SessionHandlers};
