//! GetSessionStatisticsHandler - query handler for the statistics facade.
//!
//! Pure read path: loads the session and its dysfunctions and computes
//! the view on the fly. Nothing is cached or stored, so the view can
//! never drift from the records it summarizes.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, SessionId};
use crate::domain::session::SessionError;
use crate::domain::statistics::SessionStatistics;
use crate::ports::{DysfunctionRepository, SessionRepository};

/// Query for a session's statistics view.
#[derive(Debug, Clone)]
pub struct GetSessionStatisticsQuery {
    pub session_id: SessionId,
}

/// Handler computing the statistics facade for one session.
pub struct GetSessionStatisticsHandler {
    sessions: Arc<dyn SessionRepository>,
    dysfunctions: Arc<dyn DysfunctionRepository>,
}

impl GetSessionStatisticsHandler {
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
        query: GetSessionStatisticsQuery,
        metadata: CommandMetadata,
    ) -> Result<SessionStatistics, SessionError> {
        let session = self
            .sessions
            .find_by_id(&query.session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(query.session_id))?;
        session.authorize(&metadata.user_id)?;

        let dysfunctions = self.dysfunctions.find_by_session(&query.session_id).await?;

        Ok(SessionStatistics::compute(&session, &dysfunctions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryDysfunctionRepository, InMemorySessionRepository};
    use crate::domain::dysfunction::{Dysfunction, NewDysfunction};
    use crate::domain::foundation::{
        AnalysisDomain, Classification, DysfunctionId, EntryMode, Frequency, Money, Priority,
        UserId,
    };
    use crate::domain::session::{EconomicInputs, Session};
    use rust_decimal_macros::dec;

    async fn seeded() -> (
        GetSessionStatisticsHandler,
        Arc<InMemoryDysfunctionRepository>,
        Session,
    ) {
        let sessions = Arc::new(InMemorySessionRepository::new());
        let dysfunctions = Arc::new(InMemoryDysfunctionRepository::new());

        let mut session = Session::new(
            SessionId::new(),
            UserId::new("consultant-1").unwrap(),
            "Plant floor diagnostic".to_string(),
            "Acme Industries".to_string(),
        )
        .unwrap();
        session
            .update_economics(EconomicInputs {
                scope_revenue: Some(Money::new(dec!(1_000_000))),
                gross_margin_percent: Some(dec!(25)),
                hours_worked_per_year: Some(1600),
                headcount: Some(12),
            })
            .unwrap();
        sessions.save(&session).await.unwrap();

        let handler = GetSessionStatisticsHandler::new(sessions, dysfunctions.clone());
        (handler, dysfunctions, session)
    }

    fn metadata_for(user: &str) -> CommandMetadata {
        CommandMetadata::new(UserId::new(user).unwrap())
    }

    #[tokio::test]
    async fn computes_view_over_stored_records() {
        let (handler, dysfunctions, session) = seeded().await;
        let dysfunction = Dysfunction::record(
            DysfunctionId::new(),
            *session.id(),
            NewDysfunction {
                description: "test dysfunction".to_string(),
                frequency: Frequency::Yearly,
                minutes_per_occurrence: 60,
                people_affected: 1,
                direct_cost: None,
                domain: Some(AnalysisDomain::Communication),
                taxonomy_item_id: None,
                classification: Classification::default(),
                entry_mode: EntryMode::Free,
                priority: Priority::default(),
                comments: None,
            },
            session.hourly_rate(),
        )
        .unwrap();
        dysfunctions.save(&dysfunction).await.unwrap();

        let stats = handler
            .handle(
                GetSessionStatisticsQuery {
                    session_id: *session.id(),
                },
                metadata_for("consultant-1"),
            )
            .await
            .unwrap();

        assert_eq!(stats.aggregation.dysfunction_count, 1);
        assert_eq!(stats.aggregation.total_annual_cost.amount(), dec!(156.25));
        assert_eq!(stats.cost_to_revenue_ratio, Some(dec!(0.015625)));
    }

    #[tokio::test]
    async fn empty_session_yields_zero_view() {
        let (handler, _, session) = seeded().await;

        let stats = handler
            .handle(
                GetSessionStatisticsQuery {
                    session_id: *session.id(),
                },
                metadata_for("consultant-1"),
            )
            .await
            .unwrap();

        assert_eq!(stats.aggregation.dysfunction_count, 0);
        assert_eq!(stats.average_cost_per_dysfunction, None);
    }

    #[tokio::test]
    async fn other_users_cannot_read() {
        let (handler, _, session) = seeded().await;

        let result = handler
            .handle(
                GetSessionStatisticsQuery {
                    session_id: *session.id(),
                },
                metadata_for("intruder"),
            )
            .await;

        assert!(matches!(result, Err(SessionError::Forbidden)));
    }
}
