//! In-memory adapters for deterministic tests.
//!
//! Each implements a port over a `RwLock`-guarded map. They back handler
//! unit tests and the integration scenarios; production deployments use
//! the Postgres adapters.

mod dysfunction_repository;
mod session_repository;
mod taxonomy_reader;

pub use dysfunction_repository::InMemoryDysfunctionRepository;
pub use session_repository::InMemorySessionRepository;
pub use taxonomy_reader::InMemoryTaxonomyReader;
