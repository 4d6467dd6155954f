//! RecordDysfunctionHandler - add one dysfunction to a session.

use std::sync::Arc;

use crate::domain::dysfunction::{
    Dysfunction, DysfunctionError, DysfunctionRecorded, NewDysfunction,
};
use crate::domain::foundation::{
    CommandMetadata, DysfunctionId, EventEnvelope, EventId, SessionId, Timestamp,
};
use crate::ports::{DysfunctionRepository, EventPublisher, SessionRepository};

/// Command to record a new dysfunction under a session.
#[derive(Debug, Clone)]
pub struct RecordDysfunctionCommand {
    pub session_id: SessionId,
    pub input: NewDysfunction,
}

/// Result of recording a dysfunction.
#[derive(Debug, Clone)]
pub struct RecordDysfunctionResult {
    pub dysfunction: Dysfunction,
}

/// Handler for recording dysfunctions.
pub struct RecordDysfunctionHandler {
    sessions: Arc<dyn SessionRepository>,
    dysfunctions: Arc<dyn DysfunctionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl RecordDysfunctionHandler {
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
        cmd: RecordDysfunctionCommand,
        metadata: CommandMetadata,
    ) -> Result<RecordDysfunctionResult, DysfunctionError> {
        let session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(DysfunctionError::SessionUnavailable)?;
        session.authorize(&metadata.user_id)?;
        if !session.status().is_mutable() {
            return Err(DysfunctionError::SessionArchived);
        }

        let dysfunction = Dysfunction::record(
            DysfunctionId::new(),
            cmd.session_id,
            cmd.input,
            session.hourly_rate(),
        )?;
        self.dysfunctions.save(&dysfunction).await?;

        let event = DysfunctionRecorded {
            event_id: EventId::new(),
            dysfunction_id: *dysfunction.id(),
            session_id: cmd.session_id,
            user_id: metadata.user_id.clone(),
            description: dysfunction.description().to_string(),
            cost: dysfunction.cost().copied(),
            recorded_at: Timestamp::now(),
        };
        let envelope = EventEnvelope::from_event(&event)
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        Ok(RecordDysfunctionResult { dysfunction })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{InMemoryDysfunctionRepository, InMemorySessionRepository};
    use crate::domain::foundation::{
        Classification, EntryMode, Frequency, Money, Priority, UserId,
    };
    use crate::domain::session::{EconomicInputs, Session};
    use rust_decimal_macros::dec;

    struct Fixture {
        handler: RecordDysfunctionHandler,
        dysfunctions: Arc<InMemoryDysfunctionRepository>,
        bus: Arc<InMemoryEventBus>,
        session: Session,
    }

    async fn fixture(with_rate: bool) -> Fixture {
        let sessions = Arc::new(InMemorySessionRepository::new());
        let dysfunctions = Arc::new(InMemoryDysfunctionRepository::new());
        let bus = Arc::new(InMemoryEventBus::new());

        let mut session = Session::new(
            SessionId::new(),
            UserId::new("consultant-1").unwrap(),
            "Plant floor diagnostic".to_string(),
            "Acme Industries".to_string(),
        )
        .unwrap();
        if with_rate {
            session
                .update_economics(EconomicInputs {
                    scope_revenue: Some(Money::new(dec!(1_000_000))),
                    gross_margin_percent: Some(dec!(25)),
                    hours_worked_per_year: Some(1600),
                    headcount: Some(12),
                })
                .unwrap();
        }
        sessions.save(&session).await.unwrap();

        let handler =
            RecordDysfunctionHandler::new(sessions.clone(), dysfunctions.clone(), bus.clone());
        Fixture {
            handler,
            dysfunctions,
            bus,
            session,
        }
    }

    fn input() -> NewDysfunction {
        NewDysfunction {
            description: "Weekly planning meeting overruns".to_string(),
            frequency: Frequency::Weekly,
            minutes_per_occurrence: 120,
            people_affected: 8,
            direct_cost: Some(Money::new(dec!(500))),
            domain: None,
            taxonomy_item_id: None,
            classification: Classification::default(),
            entry_mode: EntryMode::Free,
            priority: Priority::default(),
            comments: None,
        }
    }

    fn metadata() -> CommandMetadata {
        CommandMetadata::new(UserId::new("consultant-1").unwrap())
    }

    #[tokio::test]
    async fn records_priced_dysfunction() {
        let fixture = fixture(true).await;

        let result = fixture
            .handler
            .handle(
                RecordDysfunctionCommand {
                    session_id: *fixture.session.id(),
                    input: input(),
                },
                metadata(),
            )
            .await
            .unwrap();

        let cost = result.dysfunction.cost().unwrap();
        assert_eq!(cost.unit_cost.amount(), dec!(2500));
        assert_eq!(cost.annual_cost.amount(), dec!(130000));
        assert_eq!(fixture.dysfunctions.count(), 1);
        assert!(fixture.bus.has_event("dysfunction.recorded.v1"));
    }

    #[tokio::test]
    async fn records_unpriced_when_session_has_no_rate() {
        let fixture = fixture(false).await;

        let result = fixture
            .handler
            .handle(
                RecordDysfunctionCommand {
                    session_id: *fixture.session.id(),
                    input: input(),
                },
                metadata(),
            )
            .await
            .unwrap();

        assert!(result.dysfunction.cost().is_none());
    }

    #[tokio::test]
    async fn archived_session_rejects_new_records() {
        let mut fixture = fixture(true).await;
        fixture.session.archive().unwrap();
        // fixture keeps its own copy; push the archived state to the store
        let sessions = Arc::new(InMemorySessionRepository::new());
        sessions.save(&fixture.session).await.unwrap();
        let handler = RecordDysfunctionHandler::new(
            sessions,
            fixture.dysfunctions.clone(),
            fixture.bus.clone(),
        );

        let result = handler
            .handle(
                RecordDysfunctionCommand {
                    session_id: *fixture.session.id(),
                    input: input(),
                },
                metadata(),
            )
            .await;

        assert!(matches!(result, Err(DysfunctionError::SessionArchived)));
        assert_eq!(fixture.dysfunctions.count(), 0);
    }

    #[tokio::test]
    async fn unknown_session_is_reported() {
        let fixture = fixture(true).await;

        let result = fixture
            .handler
            .handle(
                RecordDysfunctionCommand {
                    session_id: SessionId::new(),
                    input: input(),
                },
                metadata(),
            )
            .await;

        assert!(matches!(result, Err(DysfunctionError::SessionUnavailable)));
    }
}
