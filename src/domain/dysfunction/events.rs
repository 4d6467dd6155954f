//! Dysfunction domain events.
//!
//! - `DysfunctionRecorded` - New dysfunction recorded under a session
//! - `DysfunctionUpdated` - Impact figures changed; cost repriced
//! - `DysfunctionClassified` - ISEOR flags or domain assignment changed
//! - `DysfunctionsBulkRecorded` - A catalog selection was expanded into records
//! - `DysfunctionDeleted` - Dysfunction removed

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    domain_event, AnalysisDomain, Classification, DysfunctionId, EventId, Money, SessionId,
    TaxonomyItemId, Timestamp, UserId,
};

use super::cost::ComputedCost;

/// Published when a new dysfunction is recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DysfunctionRecorded {
    pub event_id: EventId,
    pub dysfunction_id: DysfunctionId,
    pub session_id: SessionId,
    pub user_id: UserId,
    pub description: String,
    pub cost: Option<ComputedCost>,
    pub recorded_at: Timestamp,
}

domain_event!(
    DysfunctionRecorded,
    event_type = "dysfunction.recorded.v1",
    aggregate_id = dysfunction_id,
    aggregate_type = "Dysfunction",
    occurred_at = recorded_at,
    event_id = event_id
);

/// Published when a dysfunction's impact figures change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DysfunctionUpdated {
    pub event_id: EventId,
    pub dysfunction_id: DysfunctionId,
    pub session_id: SessionId,
    pub user_id: UserId,
    pub cost: Option<ComputedCost>,
    pub updated_at: Timestamp,
}

domain_event!(
    DysfunctionUpdated,
    event_type = "dysfunction.updated.v1",
    aggregate_id = dysfunction_id,
    aggregate_type = "Dysfunction",
    occurred_at = updated_at,
    event_id = event_id
);

/// Published when a dysfunction's classification flags or domain change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DysfunctionClassified {
    pub event_id: EventId,
    pub dysfunction_id: DysfunctionId,
    pub session_id: SessionId,
    pub user_id: UserId,
    pub classification: Classification,
    pub domain: Option<AnalysisDomain>,
    pub classified_at: Timestamp,
}

domain_event!(
    DysfunctionClassified,
    event_type = "dysfunction.classified.v1",
    aggregate_id = dysfunction_id,
    aggregate_type = "Dysfunction",
    occurred_at = classified_at,
    event_id = event_id
);

/// Published once per bulk expansion of a catalog selection.
///
/// Aggregated on the session because the batch belongs to the session as a
/// whole, not to any single record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DysfunctionsBulkRecorded {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub user_id: UserId,
    pub taxonomy_item_ids: Vec<TaxonomyItemId>,
    pub dysfunction_ids: Vec<DysfunctionId>,
    pub recorded_at: Timestamp,
}

domain_event!(
    DysfunctionsBulkRecorded,
    event_type = "dysfunction.bulk_recorded.v1",
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = recorded_at,
    event_id = event_id
);

/// Published when a dysfunction is deleted.
///
/// Carries the annual cost the record contributed so that read models can
/// adjust session totals without a reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DysfunctionDeleted {
    pub event_id: EventId,
    pub dysfunction_id: DysfunctionId,
    pub session_id: SessionId,
    pub user_id: UserId,
    pub removed_annual_cost: Money,
    pub deleted_at: Timestamp,
}

domain_event!(
    DysfunctionDeleted,
    event_type = "dysfunction.deleted.v1",
    aggregate_id = dysfunction_id,
    aggregate_type = "Dysfunction",
    occurred_at = deleted_at,
    event_id = event_id
);
