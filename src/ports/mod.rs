//! Ports - interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionRepository` - Session aggregate persistence
//! - `DysfunctionRepository` - Dysfunction persistence (with batch ops)
//! - `TaxonomyReader` - Read access to the ISEOR reference catalog
//! - `EventPublisher` - Domain event publication

mod dysfunction_repository;
mod event_publisher;
mod session_repository;
mod taxonomy_reader;

pub use dysfunction_repository::DysfunctionRepository;
pub use event_publisher::EventPublisher;
pub use session_repository::SessionRepository;
pub use taxonomy_reader::TaxonomyReader;
