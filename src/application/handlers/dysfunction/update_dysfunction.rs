//! UpdateDysfunctionHandler - change a record's impact figures.

use std::sync::Arc;

use crate::domain::dysfunction::{
    Dysfunction, DysfunctionError, DysfunctionUpdated, ImpactUpdate,
};
use crate::domain::foundation::{
    CommandMetadata, DysfunctionId, EventEnvelope, EventId, Timestamp,
};
use crate::ports::{DysfunctionRepository, EventPublisher, SessionRepository};

/// Command to update a dysfunction's impact figures.
#[derive(Debug, Clone)]
pub struct UpdateDysfunctionCommand {
    pub dysfunction_id: DysfunctionId,
    pub update: ImpactUpdate,
    /// Marks the record as reviewed by the consultant.
    pub mark_validated: bool,
}

/// Result of a successful update.
#[derive(Debug, Clone)]
pub struct UpdateDysfunctionResult {
    pub dysfunction: Dysfunction,
}

/// Handler for updating dysfunctions.
pub struct UpdateDysfunctionHandler {
    sessions: Arc<dyn SessionRepository>,
    dysfunctions: Arc<dyn DysfunctionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UpdateDysfunctionHandler {
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
        cmd: UpdateDysfunctionCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateDysfunctionResult, DysfunctionError> {
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

        dysfunction.update_impact(cmd.update, session.hourly_rate())?;
        if cmd.mark_validated {
            dysfunction.mark_validated();
        }
        self.dysfunctions.update(&dysfunction).await?;

        let event = DysfunctionUpdated {
            event_id: EventId::new(),
            dysfunction_id: cmd.dysfunction_id,
            session_id: *dysfunction.session_id(),
            user_id: metadata.user_id.clone(),
            cost: dysfunction.cost().copied(),
            updated_at: Timestamp::now(),
        };
        let envelope = EventEnvelope::from_event(&event)
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        Ok(UpdateDysfunctionResult { dysfunction })
    }
}
