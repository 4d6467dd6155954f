//! Dysfunction aggregate entity.
//!
//! One identified malfunction recorded under exactly one session. Carries
//! the raw impact figures (frequency, duration, people, direct cost), the
//! ISEOR classification flags, and the derived cost pair.
//!
//! # Derived state
//!
//! `cost` is never user-settable. It is refreshed through
//! [`Dysfunction::refresh_cost`] on every mutation of the record's own
//! inputs, and again by the session-level fan-out whenever the owning
//! session's hourly rate changes.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AnalysisDomain, Classification, DomainError, DysfunctionId, EntryMode, Frequency, Money,
    Priority, SessionId, TaxonomyItemId, Timestamp,
};

use super::cost::{ComputedCost, CostCalculator};

/// Validated input for recording a new dysfunction.
#[derive(Debug, Clone)]
pub struct NewDysfunction {
    pub description: String,
    pub frequency: Frequency,
    pub minutes_per_occurrence: u32,
    pub people_affected: u32,
    pub direct_cost: Option<Money>,
    pub domain: Option<AnalysisDomain>,
    pub taxonomy_item_id: Option<TaxonomyItemId>,
    pub classification: Classification,
    pub entry_mode: EntryMode,
    pub priority: Priority,
    pub comments: Option<String>,
}

/// Partial update of a dysfunction's impact figures.
///
/// `None` means "leave unchanged"; this replaces the original codebase's
/// scattered strip-empty-fields request cleaning with one explicit
/// normalization step at the boundary.
#[derive(Debug, Clone, Default)]
pub struct ImpactUpdate {
    pub description: Option<String>,
    pub frequency: Option<Frequency>,
    pub minutes_per_occurrence: Option<u32>,
    pub people_affected: Option<u32>,
    pub direct_cost: Option<Money>,
    pub priority: Option<Priority>,
    pub comments: Option<Option<String>>,
}

/// Dysfunction aggregate - one recorded malfunction.
///
/// # Invariants
///
/// - `description` is non-empty
/// - `minutes_per_occurrence >= 1`, `people_affected >= 1`
/// - `direct_cost >= 0`
/// - `cost` equals `CostCalculator::compute(..)` for the rate last applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dysfunction {
    id: DysfunctionId,
    session_id: SessionId,
    taxonomy_item_id: Option<TaxonomyItemId>,
    description: String,
    frequency: Frequency,
    minutes_per_occurrence: u32,
    people_affected: u32,
    direct_cost: Money,
    classification: Classification,
    domain: Option<AnalysisDomain>,
    entry_mode: EntryMode,
    priority: Priority,
    validated: bool,
    comments: Option<String>,
    cost: Option<ComputedCost>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Dysfunction {
    /// Record a new dysfunction under a session, pricing it against the
    /// session's current hourly rate.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for an empty description, zero duration, or
    ///   zero people affected
    pub fn record(
        id: DysfunctionId,
        session_id: SessionId,
        input: NewDysfunction,
        hourly_rate: Option<Money>,
    ) -> Result<Self, DomainError> {
        Self::validate_description(&input.description)?;
        Self::validate_at_least_one("minutes_per_occurrence", input.minutes_per_occurrence)?;
        Self::validate_at_least_one("people_affected", input.people_affected)?;

        let now = Timestamp::now();
        let mut dysfunction = Self {
            id,
            session_id,
            taxonomy_item_id: input.taxonomy_item_id,
            description: input.description,
            frequency: input.frequency,
            minutes_per_occurrence: input.minutes_per_occurrence,
            people_affected: input.people_affected,
            direct_cost: input.direct_cost.unwrap_or(Money::ZERO),
            classification: input.classification,
            domain: input.domain,
            entry_mode: input.entry_mode,
            priority: input.priority,
            validated: false,
            comments: input.comments,
            cost: None,
            created_at: now,
            updated_at: now,
        };
        dysfunction.refresh_cost(hourly_rate);
        Ok(dysfunction)
    }

    /// Reconstitute from persistence (no validation, no recompute).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: DysfunctionId,
        session_id: SessionId,
        taxonomy_item_id: Option<TaxonomyItemId>,
        description: String,
        frequency: Frequency,
        minutes_per_occurrence: u32,
        people_affected: u32,
        direct_cost: Money,
        classification: Classification,
        domain: Option<AnalysisDomain>,
        entry_mode: EntryMode,
        priority: Priority,
        validated: bool,
        comments: Option<String>,
        cost: Option<ComputedCost>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            session_id,
            taxonomy_item_id,
            description,
            frequency,
            minutes_per_occurrence,
            people_affected,
            direct_cost,
            classification,
            domain,
            entry_mode,
            priority,
            validated,
            comments,
            cost,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &DysfunctionId {
        &self.id
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn taxonomy_item_id(&self) -> Option<&TaxonomyItemId> {
        self.taxonomy_item_id.as_ref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn minutes_per_occurrence(&self) -> u32 {
        self.minutes_per_occurrence
    }

    pub fn people_affected(&self) -> u32 {
        self.people_affected
    }

    pub fn direct_cost(&self) -> Money {
        self.direct_cost
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn domain(&self) -> Option<AnalysisDomain> {
        self.domain
    }

    pub fn entry_mode(&self) -> EntryMode {
        self.entry_mode
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn is_validated(&self) -> bool {
        self.validated
    }

    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }

    /// The derived cost pair; None while the session rate is undefined.
    pub fn cost(&self) -> Option<&ComputedCost> {
        self.cost.as_ref()
    }

    /// The annual cost, treating an undefined cost as zero contribution.
    pub fn annual_cost_or_zero(&self) -> Money {
        self.cost.map(|c| c.annual_cost).unwrap_or(Money::ZERO)
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply a partial impact update and reprice against the given rate.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for an empty description, zero duration, or
    ///   zero people affected
    pub fn update_impact(
        &mut self,
        update: ImpactUpdate,
        hourly_rate: Option<Money>,
    ) -> Result<(), DomainError> {
        if let Some(description) = &update.description {
            Self::validate_description(description)?;
        }
        if let Some(minutes) = update.minutes_per_occurrence {
            Self::validate_at_least_one("minutes_per_occurrence", minutes)?;
        }
        if let Some(people) = update.people_affected {
            Self::validate_at_least_one("people_affected", people)?;
        }

        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(frequency) = update.frequency {
            self.frequency = frequency;
        }
        if let Some(minutes) = update.minutes_per_occurrence {
            self.minutes_per_occurrence = minutes;
        }
        if let Some(people) = update.people_affected {
            self.people_affected = people;
        }
        if let Some(direct_cost) = update.direct_cost {
            self.direct_cost = direct_cost;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(comments) = update.comments {
            self.comments = comments;
        }

        self.refresh_cost(hourly_rate);
        self.touch();
        Ok(())
    }

    /// Replace classification flags and/or the domain assignment.
    ///
    /// Classification changes do not affect cost, so no rate is needed.
    pub fn classify(
        &mut self,
        classification: Option<Classification>,
        domain: Option<Option<AnalysisDomain>>,
    ) {
        if let Some(classification) = classification {
            self.classification = classification;
        }
        if let Some(domain) = domain {
            self.domain = domain;
        }
        self.touch();
    }

    /// Mark the record as reviewed and confirmed by the consultant.
    pub fn mark_validated(&mut self) {
        self.validated = true;
        self.touch();
    }

    /// Recompute the derived cost pair from the given session rate.
    ///
    /// This is the single entry point for cost refresh: record creation,
    /// impact updates, and the session-level fan-out all pass through here.
    pub fn refresh_cost(&mut self, hourly_rate: Option<Money>) {
        self.cost = CostCalculator::compute(
            hourly_rate,
            self.minutes_per_occurrence,
            self.people_affected,
            self.direct_cost,
            self.frequency,
        );
    }

    /// Fan-out entry point: reprice against a new session rate and report
    /// whether the stored cost actually moved.
    pub fn apply_rate(&mut self, hourly_rate: Option<Money>) -> bool {
        let previous = self.cost;
        self.refresh_cost(hourly_rate);
        if self.cost != previous {
            self.touch();
            true
        } else {
            false
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    fn validate_description(description: &str) -> Result<(), DomainError> {
        if description.trim().is_empty() {
            return Err(DomainError::validation(
                "description",
                "Description cannot be empty",
            ));
        }
        Ok(())
    }

    fn validate_at_least_one(field: &str, value: u32) -> Result<(), DomainError> {
        if value < 1 {
            return Err(DomainError::validation(
                field,
                format!("{} must be at least 1", field),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_input() -> NewDysfunction {
        NewDysfunction {
            description: "Weekly planning meeting overruns by two hours".to_string(),
            frequency: Frequency::Weekly,
            minutes_per_occurrence: 120,
            people_affected: 8,
            direct_cost: Some(Money::new(dec!(500))),
            domain: Some(AnalysisDomain::TimeManagement),
            taxonomy_item_id: None,
            classification: Classification::default(),
            entry_mode: EntryMode::Free,
            priority: Priority::default(),
            comments: None,
        }
    }

    fn rate() -> Option<Money> {
        Some(Money::new(dec!(156.25)))
    }

    #[test]
    fn record_with_rate_computes_costs() {
        let d = Dysfunction::record(DysfunctionId::new(), SessionId::new(), base_input(), rate())
            .unwrap();

        let cost = d.cost().unwrap();
        assert_eq!(cost.unit_cost.amount(), dec!(2500));
        assert_eq!(cost.annual_cost.amount(), dec!(130000));
    }

    #[test]
    fn record_without_rate_leaves_cost_undefined() {
        let d = Dysfunction::record(DysfunctionId::new(), SessionId::new(), base_input(), None)
            .unwrap();

        assert!(d.cost().is_none());
        assert_eq!(d.annual_cost_or_zero(), Money::ZERO);
    }

    #[test]
    fn record_rejects_empty_description() {
        let mut input = base_input();
        input.description = "   ".to_string();
        let result = Dysfunction::record(DysfunctionId::new(), SessionId::new(), input, rate());
        assert!(result.is_err());
    }

    #[test]
    fn record_rejects_zero_duration() {
        let mut input = base_input();
        input.minutes_per_occurrence = 0;
        let result = Dysfunction::record(DysfunctionId::new(), SessionId::new(), input, rate());
        assert!(result.is_err());
    }

    #[test]
    fn record_rejects_zero_people() {
        let mut input = base_input();
        input.people_affected = 0;
        let result = Dysfunction::record(DysfunctionId::new(), SessionId::new(), input, rate());
        assert!(result.is_err());
    }

    #[test]
    fn missing_direct_cost_defaults_to_zero() {
        let mut input = base_input();
        input.direct_cost = None;
        let d =
            Dysfunction::record(DysfunctionId::new(), SessionId::new(), input, rate()).unwrap();
        assert_eq!(d.direct_cost(), Money::ZERO);
        // 2h * 156.25 * 8 = 2500, no direct cost on top
        assert_eq!(d.cost().unwrap().unit_cost.amount(), dec!(2500));
    }

    #[test]
    fn update_impact_reprices() {
        let mut d =
            Dysfunction::record(DysfunctionId::new(), SessionId::new(), base_input(), rate())
                .unwrap();

        d.update_impact(
            ImpactUpdate {
                frequency: Some(Frequency::Monthly),
                minutes_per_occurrence: Some(60),
                ..Default::default()
            },
            rate(),
        )
        .unwrap();

        let cost = d.cost().unwrap();
        // 1h * 156.25 * 8 + 500 = 1750; * 12 = 21000
        assert_eq!(cost.unit_cost.amount(), dec!(1750));
        assert_eq!(cost.annual_cost.amount(), dec!(21000));
    }

    #[test]
    fn update_impact_validates_before_applying() {
        let mut d =
            Dysfunction::record(DysfunctionId::new(), SessionId::new(), base_input(), rate())
                .unwrap();

        let result = d.update_impact(
            ImpactUpdate {
                description: Some("ok".to_string()),
                people_affected: Some(0),
                ..Default::default()
            },
            rate(),
        );

        assert!(result.is_err());
        // Nothing applied on failure
        assert_eq!(d.people_affected(), 8);
        assert_eq!(d.description(), base_input().description);
    }

    #[test]
    fn apply_rate_clears_cost_when_rate_disappears() {
        let mut d =
            Dysfunction::record(DysfunctionId::new(), SessionId::new(), base_input(), rate())
                .unwrap();

        let changed = d.apply_rate(None);
        assert!(changed);
        assert!(d.cost().is_none());
    }

    #[test]
    fn apply_rate_is_idempotent_for_same_rate() {
        let mut d =
            Dysfunction::record(DysfunctionId::new(), SessionId::new(), base_input(), rate())
                .unwrap();

        assert!(!d.apply_rate(rate()));
    }

    #[test]
    fn classify_replaces_flags_and_domain() {
        let mut d =
            Dysfunction::record(DysfunctionId::new(), SessionId::new(), base_input(), rate())
                .unwrap();

        let mut classification = Classification::default();
        classification.absenteeism = true;
        classification.excess_time = true;

        d.classify(Some(classification), Some(None));

        assert!(d.classification().absenteeism);
        assert_eq!(d.domain(), None);
    }

    #[test]
    fn classification_change_does_not_touch_cost() {
        let mut d =
            Dysfunction::record(DysfunctionId::new(), SessionId::new(), base_input(), rate())
                .unwrap();
        let before = *d.cost().unwrap();

        d.classify(
            Some(Classification::from_flags(
                &[crate::domain::foundation::Indicator::QualityDefects],
                &[],
            )),
            None,
        );

        assert_eq!(*d.cost().unwrap(), before);
    }

    #[test]
    fn mark_validated_sets_flag() {
        let mut d =
            Dysfunction::record(DysfunctionId::new(), SessionId::new(), base_input(), rate())
                .unwrap();
        assert!(!d.is_validated());
        d.mark_validated();
        assert!(d.is_validated());
    }
}
