//! In-memory taxonomy reader for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{AnalysisDomain, DomainError, TaxonomyItemId};
use crate::domain::taxonomy::TaxonomyItem;
use crate::ports::TaxonomyReader;

/// In-memory implementation of [`TaxonomyReader`], seeded per test.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. Acceptable for test
/// code; this adapter should NOT be used in production.
pub struct InMemoryTaxonomyReader {
    items: RwLock<HashMap<TaxonomyItemId, TaxonomyItem>>,
}

impl InMemoryTaxonomyReader {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
        }
    }

    pub fn seeded(items: Vec<TaxonomyItem>) -> Self {
        let reader = Self::new();
        reader.seed(items);
        reader
    }

    pub fn seed(&self, items: Vec<TaxonomyItem>) {
        let mut store = self
            .items
            .write()
            .expect("InMemoryTaxonomyReader: lock poisoned");
        for item in items {
            store.insert(item.id, item);
        }
    }
}

impl Default for InMemoryTaxonomyReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaxonomyReader for InMemoryTaxonomyReader {
    async fn find_by_id(&self, id: &TaxonomyItemId) -> Result<Option<TaxonomyItem>, DomainError> {
        Ok(self
            .items
            .read()
            .expect("InMemoryTaxonomyReader: lock poisoned")
            .get(id)
            .cloned())
    }

    async fn find_by_ids(
        &self,
        ids: &[TaxonomyItemId],
    ) -> Result<Vec<TaxonomyItem>, DomainError> {
        let store = self
            .items
            .read()
            .expect("InMemoryTaxonomyReader: lock poisoned");
        Ok(ids.iter().filter_map(|id| store.get(id).cloned()).collect())
    }

    async fn list_active(
        &self,
        domain: Option<AnalysisDomain>,
    ) -> Result<Vec<TaxonomyItem>, DomainError> {
        let mut items: Vec<TaxonomyItem> = self
            .items
            .read()
            .expect("InMemoryTaxonomyReader: lock poisoned")
            .values()
            .filter(|item| item.active)
            .filter(|item| domain.map_or(true, |d| item.domain == d))
            .cloned()
            .collect();
        items.sort_by_key(|item| (item.display_order, item.code.clone()));
        Ok(items)
    }
}
