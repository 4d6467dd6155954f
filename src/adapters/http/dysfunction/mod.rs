//! Dysfunction HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::DysfunctionResponse;
pub use handlers::DysfunctionHandlers;
pub use routes::dysfunction_routes;
