//! ArchiveSessionHandler - soft delete.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, EventEnvelope, EventId, SessionId, Timestamp};
use crate::domain::session::{Session, SessionArchived, SessionError};
use crate::ports::{EventPublisher, SessionRepository};

/// Command to archive a session.
#[derive(Debug, Clone)]
pub struct ArchiveSessionCommand {
    pub session_id: SessionId,
}

/// Result of a successful archive.
#[derive(Debug, Clone)]
pub struct ArchiveSessionResult {
    pub session: Session,
}

/// Handler for archiving sessions.
pub struct ArchiveSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ArchiveSessionHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            sessions,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ArchiveSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<ArchiveSessionResult, SessionError> {
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(cmd.session_id))?;
        session.authorize(&metadata.user_id)?;

        session.archive().map_err(|_| SessionError::AlreadyArchived)?;
        self.sessions.update(&session).await?;

        let event = SessionArchived {
            event_id: EventId::new(),
            session_id: cmd.session_id,
            user_id: metadata.user_id.clone(),
            archived_at: Timestamp::now(),
        };
        let envelope = EventEnvelope::from_event(&event)
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        Ok(ArchiveSessionResult { session })
    }
}
