//! Session repository port (write side).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId, UserId};
use crate::domain::session::Session;

/// Repository port for Session aggregate persistence.
///
/// Implementations must ensure:
/// - `find_by_id` returns sessions regardless of owner; ownership checks
///   belong to the aggregate, not the store
/// - `list_for_user` excludes nothing by status; callers filter
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Save a new session.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, session: &Session) -> Result<(), DomainError>;

    /// Update an existing session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session does not exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, session: &Session) -> Result<(), DomainError>;

    /// Find a session by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// List all sessions owned by a consultant, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Session>, DomainError>;

    /// Delete a session.
    ///
    /// Dysfunction cleanup is the caller's responsibility; the handlers
    /// delete dependents first so no store is left with orphans.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session does not exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &SessionId) -> Result<(), DomainError>;
}
