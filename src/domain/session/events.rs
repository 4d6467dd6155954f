//! Session domain events.
//!
//! - `SessionCreated` - New diagnostic session created
//! - `EconomicInputsChanged` - Economic inputs replaced; rate re-derived.
//!   This is the named trigger for the dysfunction-cost fan-out.
//! - `SessionCostsRefreshed` - Fan-out finished over a session's dysfunctions
//! - `SessionArchived` - Session archived (soft delete)
//! - `SessionDeleted` - Session and its dysfunctions removed

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, EventId, Money, SessionId, Timestamp, UserId};

use super::economics::EconomicInputs;

/// Published when a new diagnostic session is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreated {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub user_id: UserId,
    pub title: String,
    pub company: String,
    pub created_at: Timestamp,
}

domain_event!(
    SessionCreated,
    event_type = "session.created.v1",
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = created_at,
    event_id = event_id
);

/// Published when a session's economic inputs change.
///
/// Carries the old and new derived rate so consumers can tell whether the
/// dependent dysfunction costs were affected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomicInputsChanged {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub user_id: UserId,
    pub inputs: EconomicInputs,
    pub previous_rate: Option<Money>,
    pub current_rate: Option<Money>,
    pub changed_at: Timestamp,
}

domain_event!(
    EconomicInputsChanged,
    event_type = "session.economic_inputs_changed.v1",
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = changed_at,
    event_id = event_id
);

/// Published after the cost fan-out recomputed every dysfunction under a
/// session whose rate changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCostsRefreshed {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub dysfunctions_recomputed: u32,
    pub refreshed_at: Timestamp,
}

domain_event!(
    SessionCostsRefreshed,
    event_type = "session.costs_refreshed.v1",
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = refreshed_at,
    event_id = event_id
);

/// Published when a session is archived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionArchived {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub user_id: UserId,
    pub archived_at: Timestamp,
}

domain_event!(
    SessionArchived,
    event_type = "session.archived.v1",
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = archived_at,
    event_id = event_id
);

/// Published when a session and its dysfunctions are deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDeleted {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub user_id: UserId,
    pub dysfunctions_removed: u32,
    pub deleted_at: Timestamp,
}

domain_event!(
    SessionDeleted,
    event_type = "session.deleted.v1",
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = deleted_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainEvent, EventEnvelope};

    #[test]
    fn economic_inputs_changed_routes_by_session() {
        let session_id = SessionId::new();
        let event = EconomicInputsChanged {
            event_id: EventId::new(),
            session_id,
            user_id: UserId::new("c-1").unwrap(),
            inputs: EconomicInputs::default(),
            previous_rate: None,
            current_rate: None,
            changed_at: Timestamp::now(),
        };

        assert_eq!(event.event_type(), "session.economic_inputs_changed.v1");
        assert_eq!(event.aggregate_id(), session_id.to_string());

        let envelope = EventEnvelope::from_event(&event);
        assert_eq!(envelope.schema_version, 1);
        assert_eq!(envelope.aggregate_type, "Session");
    }
}
