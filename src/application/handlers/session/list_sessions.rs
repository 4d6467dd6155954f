//! ListSessionsHandler - all sessions of the acting consultant.

use std::sync::Arc;

use crate::domain::foundation::CommandMetadata;
use crate::domain::session::{Session, SessionError};
use crate::ports::SessionRepository;

/// Handler listing the acting consultant's sessions, newest first.
pub struct ListSessionsHandler {
    sessions: Arc<dyn SessionRepository>,
}

impl ListSessionsHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, metadata: CommandMetadata) -> Result<Vec<Session>, SessionError> {
        Ok(self.sessions.list_for_user(&metadata.user_id).await?)
    }
}
