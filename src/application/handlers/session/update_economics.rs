//! UpdateEconomicsHandler - economic inputs, rate derivation, cost fan-out.
//!
//! Replacing a session's economic inputs re-derives the hourly rate. When
//! the rate moves, every dysfunction of the session is repriced in one
//! batch here, as an explicit part of this operation. Nothing else in the
//! system recomputes stored costs.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{CommandMetadata, EventEnvelope, EventId, SessionId, Timestamp};
use crate::domain::session::{
    EconomicInputs, EconomicInputsChanged, Session, SessionCostsRefreshed, SessionError,
};
use crate::ports::{DysfunctionRepository, EventPublisher, SessionRepository};

/// Command to replace a session's economic inputs.
#[derive(Debug, Clone)]
pub struct UpdateEconomicsCommand {
    pub session_id: SessionId,
    pub economics: EconomicInputs,
}

/// Result of a successful economics update.
#[derive(Debug, Clone)]
pub struct UpdateEconomicsResult {
    pub session: Session,
    /// How many dysfunctions the fan-out repriced; zero when the derived
    /// rate did not move.
    pub dysfunctions_recomputed: u32,
}

/// Handler for updating economics and fanning out cost recomputation.
pub struct UpdateEconomicsHandler {
    sessions: Arc<dyn SessionRepository>,
    dysfunctions: Arc<dyn DysfunctionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UpdateEconomicsHandler {
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
        cmd: UpdateEconomicsCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateEconomicsResult, SessionError> {
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(cmd.session_id))?;
        session.authorize(&metadata.user_id)?;

        let rate_change = session.update_economics(cmd.economics.clone())?;
        self.sessions.update(&session).await?;

        let mut dysfunctions_recomputed = 0u32;
        if rate_change.changed() {
            let mut records = self.dysfunctions.find_by_session(&cmd.session_id).await?;
            for record in &mut records {
                if record.apply_rate(rate_change.current) {
                    dysfunctions_recomputed += 1;
                }
            }
            self.dysfunctions.update_all(&records).await?;

            info!(
                session_id = %cmd.session_id,
                recomputed = dysfunctions_recomputed,
                "hourly rate changed, dysfunction costs refreshed"
            );
        }

        let correlation_id = metadata.correlation_id();
        let changed_event = EconomicInputsChanged {
            event_id: EventId::new(),
            session_id: cmd.session_id,
            user_id: metadata.user_id.clone(),
            inputs: cmd.economics,
            previous_rate: rate_change.previous,
            current_rate: rate_change.current,
            changed_at: Timestamp::now(),
        };
        let mut envelopes = vec![EventEnvelope::from_event(&changed_event)
            .with_correlation_id(correlation_id.clone())
            .with_user_id(metadata.user_id.to_string())];

        if rate_change.changed() {
            let refreshed_event = SessionCostsRefreshed {
                event_id: EventId::new(),
                session_id: cmd.session_id,
                dysfunctions_recomputed,
                refreshed_at: Timestamp::now(),
            };
            envelopes.push(
                EventEnvelope::from_event(&refreshed_event)
                    .with_correlation_id(correlation_id)
                    .with_causation_id(changed_event.event_id.to_string())
                    .with_user_id(metadata.user_id.to_string()),
            );
        }
        self.event_publisher.publish_all(envelopes).await?;

        Ok(UpdateEconomicsResult {
            session,
            dysfunctions_recomputed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{InMemoryDysfunctionRepository, InMemorySessionRepository};
    use crate::domain::dysfunction::{Dysfunction, NewDysfunction};
    use crate::domain::foundation::{
        Classification, DysfunctionId, EntryMode, Frequency, Money, Priority, UserId,
    };
    use rust_decimal_macros::dec;

    struct Fixture {
        handler: UpdateEconomicsHandler,
        sessions: Arc<InMemorySessionRepository>,
        dysfunctions: Arc<InMemoryDysfunctionRepository>,
        bus: Arc<InMemoryEventBus>,
        session: Session,
    }

    async fn fixture(initial_economics: Option<EconomicInputs>) -> Fixture {
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
        if let Some(economics) = initial_economics {
            session.update_economics(economics).unwrap();
        }
        sessions.save(&session).await.unwrap();

        let handler =
            UpdateEconomicsHandler::new(sessions.clone(), dysfunctions.clone(), bus.clone());
        Fixture {
            handler,
            sessions,
            dysfunctions,
            bus,
            session,
        }
    }

    fn economics(revenue: i64, margin: i64, hours: u32) -> EconomicInputs {
        EconomicInputs {
            scope_revenue: Some(Money::new(revenue.into())),
            gross_margin_percent: Some(margin.into()),
            hours_worked_per_year: Some(hours),
            headcount: Some(12),
        }
    }

    async fn seed_dysfunction(fixture: &Fixture, minutes: u32) -> DysfunctionId {
        let dysfunction = Dysfunction::record(
            DysfunctionId::new(),
            *fixture.session.id(),
            NewDysfunction {
                description: "test dysfunction".to_string(),
                frequency: Frequency::Yearly,
                minutes_per_occurrence: minutes,
                people_affected: 1,
                direct_cost: None,
                domain: None,
                taxonomy_item_id: None,
                classification: Classification::default(),
                entry_mode: EntryMode::Free,
                priority: Priority::default(),
                comments: None,
            },
            fixture.session.hourly_rate(),
        )
        .unwrap();
        fixture.dysfunctions.save(&dysfunction).await.unwrap();
        *dysfunction.id()
    }

    fn metadata() -> CommandMetadata {
        CommandMetadata::new(UserId::new("consultant-1").unwrap())
    }

    #[tokio::test]
    async fn setting_economics_derives_rate_and_prices_existing_records() {
        let fixture = fixture(None).await;
        let id = seed_dysfunction(&fixture, 60).await;

        let result = fixture
            .handler
            .handle(
                UpdateEconomicsCommand {
                    session_id: *fixture.session.id(),
                    economics: economics(1_000_000, 25, 1600),
                },
                metadata(),
            )
            .await
            .unwrap();

        assert_eq!(result.session.hourly_rate().unwrap().amount(), dec!(156.25));
        assert_eq!(result.dysfunctions_recomputed, 1);

        let stored = fixture.dysfunctions.find_by_id(&id).await.unwrap().unwrap();
        // 60 min yearly at 156.25/h
        assert_eq!(stored.cost().unwrap().annual_cost.amount(), dec!(156.25));
    }

    #[tokio::test]
    async fn clearing_economics_clears_dependent_costs() {
        let fixture = fixture(Some(economics(1_000_000, 25, 1600))).await;
        let id = seed_dysfunction(&fixture, 60).await;

        let result = fixture
            .handler
            .handle(
                UpdateEconomicsCommand {
                    session_id: *fixture.session.id(),
                    economics: EconomicInputs::default(),
                },
                metadata(),
            )
            .await
            .unwrap();

        assert_eq!(result.session.hourly_rate(), None);
        let stored = fixture.dysfunctions.find_by_id(&id).await.unwrap().unwrap();
        assert!(stored.cost().is_none());
    }

    #[tokio::test]
    async fn unchanged_rate_skips_fan_out() {
        let fixture = fixture(Some(economics(1_000_000, 25, 1600))).await;
        seed_dysfunction(&fixture, 60).await;

        let result = fixture
            .handler
            .handle(
                UpdateEconomicsCommand {
                    session_id: *fixture.session.id(),
                    // headcount differs but does not feed the rate
                    economics: EconomicInputs {
                        headcount: Some(50),
                        ..economics(1_000_000, 25, 1600)
                    },
                },
                metadata(),
            )
            .await
            .unwrap();

        assert_eq!(result.dysfunctions_recomputed, 0);
        assert!(fixture.bus.has_event("session.economic_inputs_changed.v1"));
        assert!(!fixture.bus.has_event("session.costs_refreshed.v1"));
    }

    #[tokio::test]
    async fn rate_change_publishes_both_events() {
        let fixture = fixture(Some(economics(1_000_000, 25, 1600))).await;
        seed_dysfunction(&fixture, 60).await;

        fixture
            .handler
            .handle(
                UpdateEconomicsCommand {
                    session_id: *fixture.session.id(),
                    economics: economics(2_000_000, 25, 1600),
                },
                metadata(),
            )
            .await
            .unwrap();

        let changed = fixture.bus.events_of_type("session.economic_inputs_changed.v1");
        let refreshed = fixture.bus.events_of_type("session.costs_refreshed.v1");
        assert_eq!(changed.len(), 1);
        assert_eq!(refreshed.len(), 1);
        // Fan-out is caused by the inputs change
        assert_eq!(
            refreshed[0].metadata.causation_id,
            Some(changed[0].event_id.to_string())
        );
    }

    #[tokio::test]
    async fn archived_session_rejects_update() {
        let mut fixture = fixture(None).await;
        fixture.session.archive().unwrap();
        fixture.sessions.update(&fixture.session).await.unwrap();

        let result = fixture
            .handler
            .handle(
                UpdateEconomicsCommand {
                    session_id: *fixture.session.id(),
                    economics: economics(1_000_000, 25, 1600),
                },
                metadata(),
            )
            .await;

        assert!(matches!(result, Err(SessionError::AlreadyArchived)));
    }

    #[tokio::test]
    async fn invalid_margin_rejected_before_persisting() {
        let fixture = fixture(None).await;

        let result = fixture
            .handler
            .handle(
                UpdateEconomicsCommand {
                    session_id: *fixture.session.id(),
                    economics: EconomicInputs {
                        gross_margin_percent: Some(dec!(150)),
                        ..EconomicInputs::default()
                    },
                },
                metadata(),
            )
            .await;

        assert!(matches!(result, Err(SessionError::ValidationFailed { .. })));
        let stored = fixture
            .sessions
            .find_by_id(fixture.session.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.hourly_rate(), None);
    }
}
