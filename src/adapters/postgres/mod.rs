//! PostgreSQL adapters implementing the repository ports.

mod dysfunction_repository;
mod session_repository;
mod taxonomy_reader;

pub use dysfunction_repository::PostgresDysfunctionRepository;
pub use session_repository::PostgresSessionRepository;
pub use taxonomy_reader::PostgresTaxonomyReader;

use crate::domain::foundation::{DomainError, ErrorCode};

pub(crate) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to {}: {}", context, e),
    )
}

pub(crate) fn decode_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to get {}: {}", column, e),
    )
}
