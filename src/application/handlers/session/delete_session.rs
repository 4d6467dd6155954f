//! DeleteSessionHandler - hard delete with dysfunction cascade.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{CommandMetadata, EventEnvelope, EventId, SessionId, Timestamp};
use crate::domain::session::{SessionDeleted, SessionError};
use crate::ports::{DysfunctionRepository, EventPublisher, SessionRepository};

/// Command to permanently delete a session and its dysfunctions.
#[derive(Debug, Clone)]
pub struct DeleteSessionCommand {
    pub session_id: SessionId,
}

/// Result of a successful delete.
#[derive(Debug, Clone)]
pub struct DeleteSessionResult {
    pub dysfunctions_removed: u32,
}

/// Handler for deleting sessions.
pub struct DeleteSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    dysfunctions: Arc<dyn DysfunctionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl DeleteSessionHandler {
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
        cmd: DeleteSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<DeleteSessionResult, SessionError> {
        let session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(cmd.session_id))?;
        session.authorize(&metadata.user_id)?;

        // Dependents first so a failure cannot orphan them.
        let dysfunctions_removed =
            self.dysfunctions.delete_by_session(&cmd.session_id).await? as u32;
        self.sessions.delete(&cmd.session_id).await?;

        info!(
            session_id = %cmd.session_id,
            dysfunctions_removed,
            "session deleted"
        );

        let event = SessionDeleted {
            event_id: EventId::new(),
            session_id: cmd.session_id,
            user_id: metadata.user_id.clone(),
            dysfunctions_removed,
            deleted_at: Timestamp::now(),
        };
        let envelope = EventEnvelope::from_event(&event)
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        Ok(DeleteSessionResult {
            dysfunctions_removed,
        })
    }
}
