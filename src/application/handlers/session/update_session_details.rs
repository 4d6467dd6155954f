//! UpdateSessionDetailsHandler - descriptive fields only.
//!
//! Title, company, sector, notes, interview date. Economic inputs go
//! through `UpdateEconomicsHandler` because only those affect costs.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, SessionId, Timestamp};
use crate::domain::session::{Session, SessionError};
use crate::ports::SessionRepository;

/// Command to update a session's descriptive fields.
///
/// `None` leaves a field unchanged. For the nullable `sector` and `notes`
/// an explicit `Some(None)` clears the stored value.
#[derive(Debug, Clone)]
pub struct UpdateSessionDetailsCommand {
    pub session_id: SessionId,
    pub title: Option<String>,
    pub sector: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub interview_date: Option<Timestamp>,
}

/// Result of a successful details update.
#[derive(Debug, Clone)]
pub struct UpdateSessionDetailsResult {
    pub session: Session,
}

/// Handler for updating session details.
pub struct UpdateSessionDetailsHandler {
    sessions: Arc<dyn SessionRepository>,
}

impl UpdateSessionDetailsHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn handle(
        &self,
        cmd: UpdateSessionDetailsCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateSessionDetailsResult, SessionError> {
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(cmd.session_id))?;
        session.authorize(&metadata.user_id)?;

        if let Some(title) = cmd.title {
            session.rename(title)?;
        }
        session.update_details(cmd.sector, cmd.notes, cmd.interview_date)?;

        self.sessions.update(&session).await?;

        Ok(UpdateSessionDetailsResult { session })
    }
}
