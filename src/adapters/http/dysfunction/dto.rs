//! HTTP DTOs for dysfunction endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::adapters::http::patch::double_option;
use crate::domain::dysfunction::{Dysfunction, ImpactUpdate, NewDysfunction};
use crate::domain::foundation::{
    AnalysisDomain, Classification, EntryMode, Frequency, Money, Priority, TaxonomyItemId,
};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to record a new dysfunction.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordDysfunctionRequest {
    pub description: String,
    pub frequency: Frequency,
    pub minutes_per_occurrence: u32,
    pub people_affected: u32,
    #[serde(default)]
    pub direct_cost: Option<Decimal>,
    #[serde(default)]
    pub domain: Option<AnalysisDomain>,
    #[serde(default)]
    pub taxonomy_item_id: Option<TaxonomyItemId>,
    #[serde(default)]
    pub classification: Classification,
    #[serde(default)]
    pub entry_mode: EntryMode,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub comments: Option<String>,
}

impl RecordDysfunctionRequest {
    pub fn into_input(self) -> NewDysfunction {
        NewDysfunction {
            description: self.description,
            frequency: self.frequency,
            minutes_per_occurrence: self.minutes_per_occurrence,
            people_affected: self.people_affected,
            direct_cost: self.direct_cost.map(Money::new),
            domain: self.domain,
            taxonomy_item_id: self.taxonomy_item_id,
            classification: self.classification,
            entry_mode: self.entry_mode,
            priority: self.priority,
            comments: self.comments,
        }
    }
}

/// Request to update a dysfunction's impact figures.
///
/// Omitted fields are left unchanged; `comments` accepts an explicit
/// `null` to clear.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDysfunctionRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub frequency: Option<Frequency>,
    #[serde(default)]
    pub minutes_per_occurrence: Option<u32>,
    #[serde(default)]
    pub people_affected: Option<u32>,
    #[serde(default)]
    pub direct_cost: Option<Decimal>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "double_option")]
    pub comments: Option<Option<String>>,
    #[serde(default)]
    pub validated: bool,
}

impl UpdateDysfunctionRequest {
    pub fn into_update(self) -> ImpactUpdate {
        ImpactUpdate {
            description: self.description,
            frequency: self.frequency,
            minutes_per_occurrence: self.minutes_per_occurrence,
            people_affected: self.people_affected,
            direct_cost: self.direct_cost.map(Money::new),
            priority: self.priority,
            comments: self.comments,
        }
    }
}

/// Request to classify a dysfunction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassifyDysfunctionRequest {
    #[serde(default)]
    pub classification: Option<Classification>,
    #[serde(default, deserialize_with = "double_option")]
    pub domain: Option<Option<AnalysisDomain>>,
}

/// Request to expand a catalog selection into dysfunction records.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkCreateRequest {
    pub taxonomy_item_ids: Vec<TaxonomyItemId>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Full dysfunction view for API responses.
///
/// Monetary fields are decimal strings rounded to cents; the cost pair is
/// absent while the owning session has no hourly rate.
#[derive(Debug, Clone, Serialize)]
pub struct DysfunctionResponse {
    pub id: String,
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxonomy_item_id: Option<String>,
    pub description: String,
    pub frequency: Frequency,
    pub minutes_per_occurrence: u32,
    pub people_affected: u32,
    pub direct_cost: String,
    pub classification: Classification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<AnalysisDomain>,
    pub entry_mode: EntryMode,
    pub priority: Priority,
    pub validated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_cost: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Dysfunction> for DysfunctionResponse {
    fn from(d: &Dysfunction) -> Self {
        Self {
            id: d.id().to_string(),
            session_id: d.session_id().to_string(),
            taxonomy_item_id: d.taxonomy_item_id().map(|id| id.to_string()),
            description: d.description().to_string(),
            frequency: d.frequency(),
            minutes_per_occurrence: d.minutes_per_occurrence(),
            people_affected: d.people_affected(),
            direct_cost: d.direct_cost().rounded().to_string(),
            classification: *d.classification(),
            domain: d.domain(),
            entry_mode: d.entry_mode(),
            priority: d.priority(),
            validated: d.is_validated(),
            comments: d.comments().map(String::from),
            unit_cost: d.cost().map(|c| c.unit_cost.rounded().to_string()),
            annual_cost: d.cost().map(|c| c.annual_cost.rounded().to_string()),
            created_at: d.created_at().as_datetime().to_rfc3339(),
            updated_at: d.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

/// Response for a bulk creation.
#[derive(Debug, Clone, Serialize)]
pub struct BulkCreateResponse {
    pub created: Vec<DysfunctionResponse>,
}

/// Response for a dysfunction delete.
#[derive(Debug, Clone, Serialize)]
pub struct DysfunctionDeletedResponse {
    pub dysfunction_id: String,
    pub message: String,
}
