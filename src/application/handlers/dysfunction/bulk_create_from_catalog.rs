//! BulkCreateFromCatalogHandler - expand a catalog selection into records.
//!
//! One dysfunction per selected taxonomy item, seeded with the item's
//! domain and suggested classification plus placeholder impact figures.
//! The consultant refines each record during the interview.

use std::sync::Arc;

use tracing::info;

use crate::domain::dysfunction::{Dysfunction, DysfunctionError, DysfunctionsBulkRecorded};
use crate::domain::foundation::{
    CommandMetadata, DysfunctionId, EventEnvelope, EventId, SessionId, TaxonomyItemId, Timestamp,
};
use crate::ports::{DysfunctionRepository, EventPublisher, SessionRepository, TaxonomyReader};

/// Command to create dysfunctions from a catalog selection.
#[derive(Debug, Clone)]
pub struct BulkCreateFromCatalogCommand {
    pub session_id: SessionId,
    pub taxonomy_item_ids: Vec<TaxonomyItemId>,
}

/// Result of a bulk creation.
#[derive(Debug, Clone)]
pub struct BulkCreateFromCatalogResult {
    pub dysfunctions: Vec<Dysfunction>,
}

/// Handler expanding catalog selections into dysfunction records.
pub struct BulkCreateFromCatalogHandler {
    sessions: Arc<dyn SessionRepository>,
    dysfunctions: Arc<dyn DysfunctionRepository>,
    taxonomy: Arc<dyn TaxonomyReader>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl BulkCreateFromCatalogHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        dysfunctions: Arc<dyn DysfunctionRepository>,
        taxonomy: Arc<dyn TaxonomyReader>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            sessions,
            dysfunctions,
            taxonomy,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: BulkCreateFromCatalogCommand,
        metadata: CommandMetadata,
    ) -> Result<BulkCreateFromCatalogResult, DysfunctionError> {
        if cmd.taxonomy_item_ids.is_empty() {
            return Err(DysfunctionError::validation(
                "taxonomy_item_ids",
                "Selection cannot be empty",
            ));
        }

        let session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(DysfunctionError::SessionUnavailable)?;
        session.authorize(&metadata.user_id)?;
        if !session.status().is_mutable() {
            return Err(DysfunctionError::SessionArchived);
        }

        let items = self.taxonomy.find_by_ids(&cmd.taxonomy_item_ids).await?;
        for id in &cmd.taxonomy_item_ids {
            if !items.iter().any(|item| item.id == *id) {
                return Err(DysfunctionError::unknown_catalog_item(*id));
            }
        }

        let hourly_rate = session.hourly_rate();
        let dysfunctions = items
            .iter()
            .map(|item| {
                Dysfunction::record(
                    DysfunctionId::new(),
                    cmd.session_id,
                    item.dysfunction_defaults(),
                    hourly_rate,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.dysfunctions.save_all(&dysfunctions).await?;

        info!(
            session_id = %cmd.session_id,
            created = dysfunctions.len(),
            "catalog selection expanded into dysfunctions"
        );

        let event = DysfunctionsBulkRecorded {
            event_id: EventId::new(),
            session_id: cmd.session_id,
            user_id: metadata.user_id.clone(),
            taxonomy_item_ids: cmd.taxonomy_item_ids,
            dysfunction_ids: dysfunctions.iter().map(|d| *d.id()).collect(),
            recorded_at: Timestamp::now(),
        };
        let envelope = EventEnvelope::from_event(&event)
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        Ok(BulkCreateFromCatalogResult { dysfunctions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{
        InMemoryDysfunctionRepository, InMemorySessionRepository, InMemoryTaxonomyReader,
    };
    use crate::domain::foundation::{
        AnalysisDomain, CostComponent, EntryMode, Frequency, Indicator, Money, UserId,
    };
    use crate::domain::session::{EconomicInputs, Session};
    use crate::domain::taxonomy::TaxonomyItem;
    use rust_decimal_macros::dec;

    struct Fixture {
        handler: BulkCreateFromCatalogHandler,
        dysfunctions: Arc<InMemoryDysfunctionRepository>,
        bus: Arc<InMemoryEventBus>,
        session: Session,
        items: Vec<TaxonomyItem>,
    }

    fn item(code: &str, domain: AnalysisDomain) -> TaxonomyItem {
        TaxonomyItem {
            id: TaxonomyItemId::new(),
            code: code.to_string(),
            domain,
            title: format!("Catalog dysfunction {}", code),
            description: None,
            sub_themes: vec![],
            examples: vec![],
            guiding_questions: vec![],
            default_indicators: vec![Indicator::ProductivityGaps],
            default_components: vec![CostComponent::ExcessTime],
            active: true,
            display_order: None,
        }
    }

    async fn fixture() -> Fixture {
        let sessions = Arc::new(InMemorySessionRepository::new());
        let dysfunctions = Arc::new(InMemoryDysfunctionRepository::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let items = vec![
            item("101", AnalysisDomain::WorkingConditions),
            item("302", AnalysisDomain::Communication),
        ];
        let taxonomy = Arc::new(InMemoryTaxonomyReader::seeded(items.clone()));

        let mut session = Session::new(
            SessionId::new(),
            UserId::new("consultant-1").unwrap(),
            "Plant floor diagnostic".to_string(),
            "Acme Industries".to_string(),
        )
        .unwrap();
        session
            .update_economics(EconomicInputs {
                scope_revenue: Some(Money::new(dec!(1_000_000))),
                gross_margin_percent: Some(dec!(25)),
                hours_worked_per_year: Some(1600),
                headcount: Some(12),
            })
            .unwrap();
        sessions.save(&session).await.unwrap();

        let handler = BulkCreateFromCatalogHandler::new(
            sessions,
            dysfunctions.clone(),
            taxonomy,
            bus.clone(),
        );
        Fixture {
            handler,
            dysfunctions,
            bus,
            session,
            items,
        }
    }

    fn metadata() -> CommandMetadata {
        CommandMetadata::new(UserId::new("consultant-1").unwrap())
    }

    #[tokio::test]
    async fn creates_one_record_per_item_with_defaults() {
        let fixture = fixture().await;

        let result = fixture
            .handler
            .handle(
                BulkCreateFromCatalogCommand {
                    session_id: *fixture.session.id(),
                    taxonomy_item_ids: fixture.items.iter().map(|i| i.id).collect(),
                },
                metadata(),
            )
            .await
            .unwrap();

        assert_eq!(result.dysfunctions.len(), 2);
        assert_eq!(fixture.dysfunctions.count(), 2);

        let first = &result.dysfunctions[0];
        assert_eq!(first.frequency(), Frequency::Monthly);
        assert_eq!(first.minutes_per_occurrence(), 30);
        assert_eq!(first.people_affected(), 1);
        assert_eq!(first.entry_mode(), EntryMode::Catalog);
        assert_eq!(first.domain(), Some(AnalysisDomain::WorkingConditions));
        assert!(first.classification().productivity_gaps);
        assert!(first.classification().excess_time);
        // Priced immediately: 0.5h * 156.25 * 1 = 78.125/occurrence
        assert_eq!(first.cost().unwrap().unit_cost.amount(), dec!(78.125));
    }

    #[tokio::test]
    async fn publishes_single_batch_event() {
        let fixture = fixture().await;

        fixture
            .handler
            .handle(
                BulkCreateFromCatalogCommand {
                    session_id: *fixture.session.id(),
                    taxonomy_item_ids: fixture.items.iter().map(|i| i.id).collect(),
                },
                metadata(),
            )
            .await
            .unwrap();

        assert_eq!(
            fixture.bus.events_of_type("dysfunction.bulk_recorded.v1").len(),
            1
        );
    }

    #[tokio::test]
    async fn unknown_item_rejects_whole_batch() {
        let fixture = fixture().await;
        let missing = TaxonomyItemId::new();

        let result = fixture
            .handler
            .handle(
                BulkCreateFromCatalogCommand {
                    session_id: *fixture.session.id(),
                    taxonomy_item_ids: vec![fixture.items[0].id, missing],
                },
                metadata(),
            )
            .await;

        assert!(
            matches!(result, Err(DysfunctionError::UnknownCatalogItem(id)) if id == missing)
        );
        assert_eq!(fixture.dysfunctions.count(), 0);
    }

    #[tokio::test]
    async fn empty_selection_is_rejected() {
        let fixture = fixture().await;

        let result = fixture
            .handler
            .handle(
                BulkCreateFromCatalogCommand {
                    session_id: *fixture.session.id(),
                    taxonomy_item_ids: vec![],
                },
                metadata(),
            )
            .await;

        assert!(matches!(
            result,
            Err(DysfunctionError::ValidationFailed { .. })
        ));
    }
}
