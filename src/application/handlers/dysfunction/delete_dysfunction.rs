//! DeleteDysfunctionHandler - remove one record.

use std::sync::Arc;

use crate::domain::dysfunction::{DysfunctionDeleted, DysfunctionError};
use crate::domain::foundation::{
    CommandMetadata, DysfunctionId, EventEnvelope, EventId, Timestamp,
};
use crate::ports::{DysfunctionRepository, EventPublisher, SessionRepository};

/// Command to delete a dysfunction.
#[derive(Debug, Clone)]
pub struct DeleteDysfunctionCommand {
    pub dysfunction_id: DysfunctionId,
}

/// Handler for deleting dysfunctions.
pub struct DeleteDysfunctionHandler {
    sessions: Arc<dyn SessionRepository>,
    dysfunctions: Arc<dyn DysfunctionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl DeleteDysfunctionHandler {
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
        cmd: DeleteDysfunctionCommand,
        metadata: CommandMetadata,
    ) -> Result<(), DysfunctionError> {
        let dysfunction = self
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

        self.dysfunctions.delete(&cmd.dysfunction_id).await?;

        let event = DysfunctionDeleted {
            event_id: EventId::new(),
            dysfunction_id: cmd.dysfunction_id,
            session_id: *dysfunction.session_id(),
            user_id: metadata.user_id.clone(),
            removed_annual_cost: dysfunction.annual_cost_or_zero(),
            deleted_at: Timestamp::now(),
        };
        let envelope = EventEnvelope::from_event(&event)
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{InMemoryDysfunctionRepository, InMemorySessionRepository};
    use crate::domain::dysfunction::{Dysfunction, NewDysfunction};
    use crate::domain::foundation::{
        Classification, EntryMode, Frequency, Priority, SessionId, UserId,
    };
    use crate::domain::session::Session;

    struct Fixture {
        handler: DeleteDysfunctionHandler,
        dysfunctions: Arc<InMemoryDysfunctionRepository>,
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
                description: "Obsolete stock written off quarterly".to_string(),
                frequency: Frequency::Quarterly,
                minutes_per_occurrence: 30,
                people_affected: 2,
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

        let handler =
            DeleteDysfunctionHandler::new(sessions, dysfunctions.clone(), bus.clone());
        Fixture {
            handler,
            dysfunctions,
            bus,
            dysfunction_id: *dysfunction.id(),
        }
    }

    fn metadata() -> CommandMetadata {
        CommandMetadata::new(UserId::new("consultant-1").unwrap())
    }

    #[tokio::test]
    async fn deletes_and_publishes() {
        let fixture = fixture().await;

        fixture
            .handler
            .handle(
                DeleteDysfunctionCommand {
                    dysfunction_id: fixture.dysfunction_id,
                },
                metadata(),
            )
            .await
            .unwrap();

        assert_eq!(fixture.dysfunctions.count(), 0);
        assert!(fixture.bus.has_event("dysfunction.deleted.v1"));
    }

    #[tokio::test]
    async fn missing_record_is_reported() {
        let fixture = fixture().await;
        let missing = DysfunctionId::new();

        let result = fixture
            .handler
            .handle(
                DeleteDysfunctionCommand {
                    dysfunction_id: missing,
                },
                metadata(),
            )
            .await;

        assert!(matches!(result, Err(DysfunctionError::NotFound(id)) if id == missing));
    }
}
