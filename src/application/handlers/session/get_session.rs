//! GetSessionHandler - one session with its dysfunctions.

use std::sync::Arc;

use crate::domain::dysfunction::Dysfunction;
use crate::domain::foundation::{CommandMetadata, SessionId};
use crate::domain::session::{Session, SessionError};
use crate::ports::{DysfunctionRepository, SessionRepository};

/// Query for one session and its dysfunction list.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

/// The session detail view.
#[derive(Debug, Clone)]
pub struct GetSessionResult {
    pub session: Session,
    pub dysfunctions: Vec<Dysfunction>,
}

/// Handler loading a session with its dysfunctions.
pub struct GetSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    dysfunctions: Arc<dyn DysfunctionRepository>,
}

impl GetSessionHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        dysfunctions: Arc<dyn DysfunctionRepository>,
    ) -> Self {
        Self {
            sessions,
            dysfunctions,
        }
    }

    pub async fn handle(
        &self,
        query: GetSessionQuery,
        metadata: CommandMetadata,
    ) -> Result<GetSessionResult, SessionError> {
        let session = self
            .sessions
            .find_by_id(&query.session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(query.session_id))?;
        session.authorize(&metadata.user_id)?;

        let dysfunctions = self.dysfunctions.find_by_session(&query.session_id).await?;

        Ok(GetSessionResult {
            session,
            dysfunctions,
        })
    }
}
