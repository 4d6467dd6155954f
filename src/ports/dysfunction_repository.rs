//! Dysfunction repository port (write side).

use async_trait::async_trait;

use crate::domain::dysfunction::Dysfunction;
use crate::domain::foundation::{DomainError, DysfunctionId, SessionId};

/// Repository port for Dysfunction persistence.
///
/// Batch operations exist for the two multi-record paths: bulk creation
/// from a catalog selection and the session-wide cost fan-out. Adapters
/// should make them transactional where the store supports it.
#[async_trait]
pub trait DysfunctionRepository: Send + Sync {
    /// Save a new dysfunction.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, dysfunction: &Dysfunction) -> Result<(), DomainError>;

    /// Save a batch of new dysfunctions.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure; no partial batch remains
    ///   where the store supports transactions
    async fn save_all(&self, dysfunctions: &[Dysfunction]) -> Result<(), DomainError>;

    /// Update an existing dysfunction.
    ///
    /// # Errors
    ///
    /// - `DysfunctionNotFound` if the record does not exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, dysfunction: &Dysfunction) -> Result<(), DomainError>;

    /// Update a batch of existing dysfunctions (cost fan-out path).
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn update_all(&self, dysfunctions: &[Dysfunction]) -> Result<(), DomainError>;

    /// Find a dysfunction by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &DysfunctionId) -> Result<Option<Dysfunction>, DomainError>;

    /// List all dysfunctions of a session, oldest first.
    async fn find_by_session(&self, session_id: &SessionId) -> Result<Vec<Dysfunction>, DomainError>;

    /// Delete a dysfunction.
    ///
    /// # Errors
    ///
    /// - `DysfunctionNotFound` if the record does not exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &DysfunctionId) -> Result<(), DomainError>;

    /// Delete every dysfunction of a session, returning how many were
    /// removed (session delete cascade).
    async fn delete_by_session(&self, session_id: &SessionId) -> Result<usize, DomainError>;
}
