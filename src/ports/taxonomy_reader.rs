//! Taxonomy reader port (read side).
//!
//! The ISEOR catalog is curated reference data, so the application only
//! ever reads it. Seeding and curation happen outside the service.

use async_trait::async_trait;

use crate::domain::foundation::{AnalysisDomain, DomainError, TaxonomyItemId};
use crate::domain::taxonomy::TaxonomyItem;

/// Read port over the ISEOR reference catalog.
#[async_trait]
pub trait TaxonomyReader: Send + Sync {
    /// Find a catalog item by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &TaxonomyItemId) -> Result<Option<TaxonomyItem>, DomainError>;

    /// Resolve a batch of IDs, preserving request order.
    ///
    /// Missing IDs are simply absent from the result; bulk creation
    /// decides how to treat the gap.
    async fn find_by_ids(&self, ids: &[TaxonomyItemId]) -> Result<Vec<TaxonomyItem>, DomainError>;

    /// List active catalog items, optionally limited to one domain,
    /// ordered by display order.
    async fn list_active(
        &self,
        domain: Option<AnalysisDomain>,
    ) -> Result<Vec<TaxonomyItem>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn TaxonomyReader) {}
}
