//! In-memory dysfunction repository for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::dysfunction::Dysfunction;
use crate::domain::foundation::{DomainError, DysfunctionId, ErrorCode, SessionId};
use crate::ports::DysfunctionRepository;

/// In-memory implementation of [`DysfunctionRepository`].
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. Acceptable for test
/// code; this adapter should NOT be used in production.
pub struct InMemoryDysfunctionRepository {
    dysfunctions: RwLock<HashMap<DysfunctionId, Dysfunction>>,
}

impl InMemoryDysfunctionRepository {
    pub fn new() -> Self {
        Self {
            dysfunctions: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored dysfunctions (for test assertions).
    pub fn count(&self) -> usize {
        self.dysfunctions
            .read()
            .expect("InMemoryDysfunctionRepository: lock poisoned")
            .len()
    }
}

impl Default for InMemoryDysfunctionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DysfunctionRepository for InMemoryDysfunctionRepository {
    async fn save(&self, dysfunction: &Dysfunction) -> Result<(), DomainError> {
        self.dysfunctions
            .write()
            .expect("InMemoryDysfunctionRepository: lock poisoned")
            .insert(*dysfunction.id(), dysfunction.clone());
        Ok(())
    }

    async fn save_all(&self, dysfunctions: &[Dysfunction]) -> Result<(), DomainError> {
        let mut store = self
            .dysfunctions
            .write()
            .expect("InMemoryDysfunctionRepository: lock poisoned");
        for dysfunction in dysfunctions {
            store.insert(*dysfunction.id(), dysfunction.clone());
        }
        Ok(())
    }

    async fn update(&self, dysfunction: &Dysfunction) -> Result<(), DomainError> {
        let mut store = self
            .dysfunctions
            .write()
            .expect("InMemoryDysfunctionRepository: lock poisoned");
        if !store.contains_key(dysfunction.id()) {
            return Err(DomainError::new(
                ErrorCode::DysfunctionNotFound,
                format!("Dysfunction not found: {}", dysfunction.id()),
            ));
        }
        store.insert(*dysfunction.id(), dysfunction.clone());
        Ok(())
    }

    async fn update_all(&self, dysfunctions: &[Dysfunction]) -> Result<(), DomainError> {
        let mut store = self
            .dysfunctions
            .write()
            .expect("InMemoryDysfunctionRepository: lock poisoned");
        for dysfunction in dysfunctions {
            store.insert(*dysfunction.id(), dysfunction.clone());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &DysfunctionId) -> Result<Option<Dysfunction>, DomainError> {
        Ok(self
            .dysfunctions
            .read()
            .expect("InMemoryDysfunctionRepository: lock poisoned")
            .get(id)
            .cloned())
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<Dysfunction>, DomainError> {
        let mut dysfunctions: Vec<Dysfunction> = self
            .dysfunctions
            .read()
            .expect("InMemoryDysfunctionRepository: lock poisoned")
            .values()
            .filter(|dysfunction| dysfunction.session_id() == session_id)
            .cloned()
            .collect();
        dysfunctions.sort_by(|a, b| a.created_at().cmp(b.created_at()));
        Ok(dysfunctions)
    }

    async fn delete(&self, id: &DysfunctionId) -> Result<(), DomainError> {
        let removed = self
            .dysfunctions
            .write()
            .expect("InMemoryDysfunctionRepository: lock poisoned")
            .remove(id);
        if removed.is_none() {
            return Err(DomainError::new(
                ErrorCode::DysfunctionNotFound,
                format!("Dysfunction not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn delete_by_session(&self, session_id: &SessionId) -> Result<usize, DomainError> {
        let mut store = self
            .dysfunctions
            .write()
            .expect("InMemoryDysfunctionRepository: lock poisoned");
        let ids: Vec<DysfunctionId> = store
            .values()
            .filter(|dysfunction| dysfunction.session_id() == session_id)
            .map(|dysfunction| *dysfunction.id())
            .collect();
        for id in &ids {
            store.remove(id);
        }
        Ok(ids.len())
    }
}
