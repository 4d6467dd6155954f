//! ClassifyDysfunctionHandler - ISEOR flags and domain assignment.

use std::sync::Arc;

use crate::domain::dysfunction::{Dysfunction, DysfunctionClassified, DysfunctionError};
use crate::domain::foundation::{
    AnalysisDomain, Classification, CommandMetadata, DysfunctionId, EventEnvelope, EventId,
    Timestamp,
};
use crate::ports::{DysfunctionRepository, EventPublisher, SessionRepository};

/// Command to classify a dysfunction.
///
/// Outer `None` leaves the aspect unchanged; for the domain the inner
/// `None` explicitly clears the assignment.
#[derive(Debug, Clone)]
pub struct ClassifyDysfunctionCommand {
    pub dysfunction_id: DysfunctionId,
    pub classification: Option<Classification>,
    pub domain: Option<Option<AnalysisDomain>>,
}

/// Result of a successful classification.
#[derive(Debug, Clone)]
pub struct ClassifyDysfunctionResult {
    pub dysfunction: Dysfunction,
}

/// Handler for classifying dysfunctions.
pub struct ClassifyDysfunctionHandler {
    sessions: Arc<dyn SessionRepository>,
    dysfunctions: Arc<dyn DysfunctionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ClassifyDysfunctionHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        dysfunctions: Arc<dyn DysfunctionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            sessions,
            dysfunctions,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ClassifyDysfunctionCommand,
        metadata: CommandMetadata,
    ) -> Result<ClassifyDysfunctionResult, DysfunctionError> {
        let mut dysfunction = self
            .dysfunctions
            .find_by_id(&cmd.dysfunction_id)
            .await?
            .ok_or_else(|| DysfunctionError::not_found(cmd.dysfunction_id))?;

        let session = self
            .sessions
            .find_by_id(dysfunction.session_id())
            .await?
            .ok_or(DysfunctionError::SessionUnavailable)?;
        session.authorize(&metadata.user_id)?;
        if !session.status().is_mutable() {
            return Err(DysfunctionError::SessionArchived);
        }

        dysfunction.classify(cmd.classification, cmd.domain);
        self.dysfunctions.update(&dysfunction).await?;

        let event = DysfunctionClassified {
            event_id: EventId::new(),
            dysfunction_id: cmd.dysfunction_id,
            session_id: *dysfunction.session_id(),
            user_id: metadata.user_id.clone(),
            classification: *dysfunction.classification(),
            domain: dysfunction.domain(),
            classified_at: Timestamp::now(),
        };
        let envelope = EventEnvelope::from_event(&event)
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        Ok(ClassifyDysfunctionResult { dysfunction })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{InMemoryDysfunctionRepository, InMemorySessionRepository};
    use crate::domain::dysfunction::NewDysfunction;
    use crate::domain::foundation::{
        CostComponent, EntryMode, Frequency, Indicator, Priority, SessionId, UserId,
    };
    use crate::domain::session::Session;

    struct Fixture {
        handler: ClassifyDysfunctionHandler,
        bus: Arc<InMemoryEventBus>,
        dysfunction_id: DysfunctionId,
    }

    async fn fixture() -> Fixture {
        let sessions = Arc::new(InMemorySessionRepository::new());
        let dysfunctions = Arc::new(InMemoryDysfunctionRepository::new());
        let bus = Arc::new(InMemoryEventBus::new());

        let session = Session::new(
            SessionId::new(),
            UserId::new("consultant-1").unwrap(),
            "Plant floor diagnostic".to_string(),
            "Acme Industries".to_string(),
        )
        .unwrap();
        sessions.save(&session).await.unwrap();

        let dysfunction = Dysfunction::record(
            DysfunctionId::new(),
            *session.id(),
            NewDysfunction {
                description: "Recurring rework on assembly line".to_string(),
                frequency: Frequency::Weekly,
                minutes_per_occurrence: 45,
                people_affected: 3,
                direct_cost: None,
                domain: None,
                taxonomy_item_id: None,
                classification: Classification::default(),
                entry_mode: EntryMode::Free,
                priority: Priority::default(),
                comments: None,
            },
            None,
        )
        .unwrap();
        dysfunctions.save(&dysfunction).await.unwrap();

        let handler = ClassifyDysfunctionHandler::new(sessions, dysfunctions, bus.clone());
        Fixture {
            handler,
            bus,
            dysfunction_id: *dysfunction.id(),
        }
    }

    fn metadata() -> CommandMetadata {
        CommandMetadata::new(UserId::new("consultant-1").unwrap())
    }

    #[tokio::test]
    async fn assigns_flags_and_domain() {
        let fixture = fixture().await;

        let result = fixture
            .handler
            .handle(
                ClassifyDysfunctionCommand {
                    dysfunction_id: fixture.dysfunction_id,
                    classification: Some(Classification::from_flags(
                        &[Indicator::QualityDefects],
                        &[CostComponent::ExcessTime],
                    )),
                    domain: Some(Some(AnalysisDomain::WorkOrganization)),
                },
                metadata(),
            )
            .await
            .unwrap();

        assert!(result.dysfunction.classification().quality_defects);
        assert_eq!(
            result.dysfunction.domain(),
            Some(AnalysisDomain::WorkOrganization)
        );
        assert!(fixture.bus.has_event("dysfunction.classified.v1"));
    }

    #[tokio::test]
    async fn clearing_domain_is_an_explicit_update() {
        let fixture = fixture().await;

        fixture
            .handler
            .handle(
                ClassifyDysfunctionCommand {
                    dysfunction_id: fixture.dysfunction_id,
                    classification: None,
                    domain: Some(Some(AnalysisDomain::Communication)),
                },
                metadata(),
            )
            .await
            .unwrap();

        let result = fixture
            .handler
            .handle(
                ClassifyDysfunctionCommand {
                    dysfunction_id: fixture.dysfunction_id,
                    classification: None,
                    domain: Some(None),
                },
                metadata(),
            )
            .await
            .unwrap();

        assert_eq!(result.dysfunction.domain(), None);
    }
}
