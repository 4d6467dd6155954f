//! In-memory session repository for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, UserId};
use crate::domain::session::Session;
use crate::ports::SessionRepository;

/// In-memory implementation of [`SessionRepository`].
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. Acceptable for test
/// code; this adapter should NOT be used in production.
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored sessions (for test assertions).
    pub fn count(&self) -> usize {
        self.sessions
            .read()
            .expect("InMemorySessionRepository: lock poisoned")
            .len()
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        self.sessions
            .write()
            .expect("InMemorySessionRepository: lock poisoned")
            .insert(*session.id(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self
            .sessions
            .write()
            .expect("InMemorySessionRepository: lock poisoned");
        if !sessions.contains_key(session.id()) {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id()),
            ));
        }
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self
            .sessions
            .read()
            .expect("InMemorySessionRepository: lock poisoned")
            .get(id)
            .cloned())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Session>, DomainError> {
        let mut sessions: Vec<Session> = self
            .sessions
            .read()
            .expect("InMemorySessionRepository: lock poisoned")
            .values()
            .filter(|session| session.user_id() == user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(sessions)
    }

    async fn delete(&self, id: &SessionId) -> Result<(), DomainError> {
        let removed = self
            .sessions
            .write()
            .expect("InMemorySessionRepository: lock poisoned")
            .remove(id);
        if removed.is_none() {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", id),
            ));
        }
        Ok(())
    }
}
