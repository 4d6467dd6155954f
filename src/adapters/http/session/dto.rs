//! HTTP DTOs for session endpoints.
//!
//! These types decouple the HTTP API from domain types. Monetary values
//! cross this boundary as decimal strings rounded to cents.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::adapters::http::dysfunction::DysfunctionResponse;
use crate::adapters::http::patch::double_option;
use crate::domain::dysfunction::Dysfunction;
use crate::domain::foundation::{
    AnalysisDomain, CostComponent, Frequency, Indicator, Money, SessionStatus, Timestamp,
};
use crate::domain::session::{EconomicInputs, Session};
use crate::domain::statistics::{CostBucket, SessionStatistics};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Economic inputs as received over the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EconomicsRequest {
    #[serde(default)]
    pub scope_revenue: Option<Decimal>,
    #[serde(default)]
    pub gross_margin_percent: Option<Decimal>,
    #[serde(default)]
    pub hours_worked_per_year: Option<u32>,
    #[serde(default)]
    pub headcount: Option<u32>,
}

impl EconomicsRequest {
    pub fn into_inputs(self) -> EconomicInputs {
        EconomicInputs {
            scope_revenue: self.scope_revenue.map(Money::new),
            gross_margin_percent: self.gross_margin_percent,
            hours_worked_per_year: self.hours_worked_per_year,
            headcount: self.headcount,
        }
    }
}

/// Request to create a new session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub economics: Option<EconomicsRequest>,
}

/// Request to update a session's descriptive fields.
///
/// Omitted fields are left unchanged; `sector` and `notes` accept an
/// explicit `null` to clear.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSessionDetailsRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub sector: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
    #[serde(default)]
    pub interview_date: Option<DateTime<Utc>>,
}

/// Request to replace a session's economic inputs.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEconomicsRequest {
    #[serde(flatten)]
    pub economics: EconomicsRequest,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Economic inputs and the derived rate in a session view.
#[derive(Debug, Clone, Serialize)]
pub struct EconomicsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_revenue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_margin_percent: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_worked_per_year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headcount: Option<u32>,
}

impl From<&EconomicInputs> for EconomicsResponse {
    fn from(inputs: &EconomicInputs) -> Self {
        Self {
            scope_revenue: inputs.scope_revenue.map(|m| m.rounded().to_string()),
            gross_margin_percent: inputs.gross_margin_percent,
            hours_worked_per_year: inputs.hours_worked_per_year,
            headcount: inputs.headcount,
        }
    }
}

/// Detailed session view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    pub interview_date: String,
    pub status: SessionStatus,
    pub economics: EconomicsResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id().to_string(),
            title: session.title().to_string(),
            company: session.company().to_string(),
            sector: session.sector().map(String::from),
            interview_date: rfc3339(session.interview_date()),
            status: session.status(),
            economics: session.economics().into(),
            hourly_rate: session.hourly_rate().map(|r| r.rounded().to_string()),
            notes: session.notes().map(String::from),
            created_at: rfc3339(session.created_at()),
            updated_at: rfc3339(session.updated_at()),
        }
    }
}

/// Session with its dysfunction records.
#[derive(Debug, Clone, Serialize)]
pub struct SessionDetailResponse {
    #[serde(flatten)]
    pub session: SessionResponse,
    pub dysfunctions: Vec<DysfunctionResponse>,
}

impl SessionDetailResponse {
    pub fn new(session: &Session, dysfunctions: &[Dysfunction]) -> Self {
        Self {
            session: session.into(),
            dysfunctions: dysfunctions.iter().map(Into::into).collect(),
        }
    }
}

/// Session summary for list responses.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummaryResponse {
    pub id: String,
    pub title: String,
    pub company: String,
    pub status: SessionStatus,
    pub updated_at: String,
}

impl From<&Session> for SessionSummaryResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id().to_string(),
            title: session.title().to_string(),
            company: session.company().to_string(),
            status: session.status(),
            updated_at: rfc3339(session.updated_at()),
        }
    }
}

/// List of the consultant's sessions.
#[derive(Debug, Clone, Serialize)]
pub struct SessionListResponse {
    pub items: Vec<SessionSummaryResponse>,
    pub total: usize,
}

impl SessionListResponse {
    pub fn new(sessions: &[Session]) -> Self {
        Self {
            items: sessions.iter().map(Into::into).collect(),
            total: sessions.len(),
        }
    }
}

/// Response for an economics update, reporting the fan-out size.
#[derive(Debug, Clone, Serialize)]
pub struct EconomicsUpdateResponse {
    #[serde(flatten)]
    pub session: SessionResponse,
    pub dysfunctions_recomputed: u32,
}

/// Response for a session delete.
#[derive(Debug, Clone, Serialize)]
pub struct SessionDeletedResponse {
    pub session_id: String,
    pub dysfunctions_removed: u32,
}

/// One aggregation bucket as served on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct CostBucketResponse {
    pub count: usize,
    pub total_cost: String,
}

impl From<&CostBucket> for CostBucketResponse {
    fn from(bucket: &CostBucket) -> Self {
        Self {
            count: bucket.count,
            total_cost: bucket.total_cost.rounded().to_string(),
        }
    }
}

/// Statistics view of a session. Monetary values cross the boundary as
/// decimal strings rounded to cents, like every other response.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatisticsResponse {
    pub session_id: String,
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_to_revenue_ratio: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_cost_per_dysfunction: Option<String>,
    pub dysfunction_count: usize,
    pub total_annual_cost: String,
    pub domain_distribution: BTreeMap<AnalysisDomain, CostBucketResponse>,
    pub frequency_distribution: BTreeMap<Frequency, CostBucketResponse>,
    pub indicator_component_table: BTreeMap<&'static str, BTreeMap<&'static str, String>>,
    pub indicator_counts: BTreeMap<&'static str, usize>,
    pub component_counts: BTreeMap<&'static str, usize>,
}

impl From<&SessionStatistics> for SessionStatisticsResponse {
    fn from(stats: &SessionStatistics) -> Self {
        let aggregation = &stats.aggregation;
        let table = &aggregation.indicator_component_table;
        Self {
            session_id: stats.session_id.to_string(),
            status: stats.status,
            hourly_rate: stats.hourly_rate.map(|r| r.rounded().to_string()),
            cost_to_revenue_ratio: stats.cost_to_revenue_ratio,
            average_cost_per_dysfunction: stats
                .average_cost_per_dysfunction
                .map(|m| m.rounded().to_string()),
            dysfunction_count: aggregation.dysfunction_count,
            total_annual_cost: aggregation.total_annual_cost.rounded().to_string(),
            domain_distribution: aggregation
                .domain_distribution
                .iter()
                .map(|(domain, bucket)| (domain, bucket.into()))
                .collect(),
            frequency_distribution: aggregation
                .frequency_distribution
                .iter()
                .map(|(frequency, bucket)| (frequency, bucket.into()))
                .collect(),
            indicator_component_table: Indicator::ALL
                .iter()
                .map(|indicator| {
                    let row = CostComponent::ALL
                        .iter()
                        .map(|component| {
                            let cost = table.cell(*indicator, *component);
                            (component.key(), cost.rounded().to_string())
                        })
                        .collect();
                    (indicator.key(), row)
                })
                .collect(),
            indicator_counts: Indicator::ALL
                .iter()
                .map(|indicator| (indicator.key(), table.row_count(*indicator)))
                .collect(),
            component_counts: CostComponent::ALL
                .iter()
                .map(|component| (component.key(), table.column_count(*component)))
                .collect(),
        }
    }
}

fn rfc3339(ts: &Timestamp) -> String {
    ts.as_datetime().to_rfc3339()
}
