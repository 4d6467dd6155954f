//! Session HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::SessionHandlers;
pub use routes::session_routes;
