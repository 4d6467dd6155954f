//! CreateSessionHandler - command handler for creating diagnostic sessions.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, EventEnvelope, EventId, SessionId, UserId};
use crate::domain::session::{EconomicInputs, Session, SessionCreated, SessionError};
use crate::ports::{EventPublisher, SessionRepository};

/// Command to create a new diagnostic session.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub user_id: UserId,
    pub title: String,
    pub company: String,
    pub sector: Option<String>,
    /// Economic inputs may already be known at creation time; the hourly
    /// rate is derived immediately when they are.
    pub economics: Option<EconomicInputs>,
}

/// Result of successful session creation.
#[derive(Debug, Clone)]
pub struct CreateSessionResult {
    pub session: Session,
}

/// Handler for creating sessions.
pub struct CreateSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateSessionHandler {
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
        cmd: CreateSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateSessionResult, SessionError> {
        let session_id = SessionId::new();
        let mut session = Session::new(
            session_id,
            cmd.user_id.clone(),
            cmd.title.clone(),
            cmd.company.clone(),
        )?;

        if cmd.sector.is_some() {
            session.update_details(Some(cmd.sector), None, None)?;
        }
        if let Some(economics) = cmd.economics {
            session.update_economics(economics)?;
        }

        self.sessions.save(&session).await?;

        let event = SessionCreated {
            event_id: EventId::new(),
            session_id,
            user_id: cmd.user_id,
            title: cmd.title,
            company: cmd.company,
            created_at: *session.created_at(),
        };

        let envelope = EventEnvelope::from_event(&event)
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        Ok(CreateSessionResult { session })
    }
}
