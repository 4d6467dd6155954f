//! Session statistics facade.
//!
//! Joins a session's economic context with the aggregation of its
//! dysfunctions into the single read model the reporting surface serves.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::dysfunction::Dysfunction;
use crate::domain::foundation::{Money, SessionId, SessionStatus};
use crate::domain::session::Session;

use super::aggregation::{AggregationEngine, CostAggregation};

const PERCENT: Decimal = Decimal::ONE_HUNDRED;

/// The complete statistics view of one session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatistics {
    pub session_id: SessionId,
    pub status: SessionStatus,
    /// The rate the costs below were derived with; None means no record
    /// carries a computed cost.
    pub hourly_rate: Option<Money>,
    /// Hidden costs as a percentage of the scope's annual revenue.
    /// Undefined without a positive revenue figure.
    pub cost_to_revenue_ratio: Option<Decimal>,
    /// Undefined for an empty session rather than reading as a free one.
    pub average_cost_per_dysfunction: Option<Money>,
    #[serde(flatten)]
    pub aggregation: CostAggregation,
}

impl SessionStatistics {
    /// Compute the statistics view for a session and its dysfunctions.
    ///
    /// Pure and deterministic; recomputing on unchanged inputs yields an
    /// identical view.
    pub fn compute(session: &Session, dysfunctions: &[Dysfunction]) -> Self {
        let aggregation = AggregationEngine::aggregate(dysfunctions);

        let cost_to_revenue_ratio = session
            .economics()
            .scope_revenue
            .filter(Money::is_positive)
            .map(|revenue| {
                aggregation.total_annual_cost.amount() / revenue.amount() * PERCENT
            });

        let average_cost_per_dysfunction = if aggregation.dysfunction_count > 0 {
            Some(Money::new(
                aggregation.total_annual_cost.amount()
                    / Decimal::from(aggregation.dysfunction_count as u64),
            ))
        } else {
            None
        };

        Self {
            session_id: *session.id(),
            status: session.status(),
            hourly_rate: session.hourly_rate(),
            cost_to_revenue_ratio,
            average_cost_per_dysfunction,
            aggregation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dysfunction::NewDysfunction;
    use crate::domain::foundation::{
        Classification, DysfunctionId, EntryMode, Frequency, Priority, UserId,
    };
    use crate::domain::session::EconomicInputs;
    use rust_decimal_macros::dec;

    fn session_with_revenue() -> Session {
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
        session
    }

    fn dysfunction_for(session: &Session, minutes: u32, frequency: Frequency) -> Dysfunction {
        Dysfunction::record(
            DysfunctionId::new(),
            *session.id(),
            NewDysfunction {
                description: "test dysfunction".to_string(),
                frequency,
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
            session.hourly_rate(),
        )
        .unwrap()
    }

    #[test]
    fn ratio_defined_only_with_positive_revenue() {
        let session = session_with_revenue();
        // rate 156.25; 60 min yearly -> 156.25 annual
        let d = dysfunction_for(&session, 60, Frequency::Yearly);

        let stats = SessionStatistics::compute(&session, &[d]);

        // 156.25 / 1_000_000 * 100
        assert_eq!(stats.cost_to_revenue_ratio, Some(dec!(0.015625)));
    }

    #[test]
    fn ratio_undefined_without_revenue() {
        let session = Session::new(
            SessionId::new(),
            UserId::new("consultant-1").unwrap(),
            "No economics yet".to_string(),
            "Acme Industries".to_string(),
        )
        .unwrap();

        let stats = SessionStatistics::compute(&session, &[]);

        assert_eq!(stats.cost_to_revenue_ratio, None);
        assert_eq!(stats.hourly_rate, None);
    }

    #[test]
    fn average_undefined_for_empty_session() {
        let session = session_with_revenue();
        let stats = SessionStatistics::compute(&session, &[]);

        assert_eq!(stats.average_cost_per_dysfunction, None);
        assert_eq!(stats.aggregation.dysfunction_count, 0);
    }

    #[test]
    fn average_divides_total_by_count() {
        let session = session_with_revenue();
        let dysfunctions = vec![
            dysfunction_for(&session, 60, Frequency::Yearly),
            dysfunction_for(&session, 180, Frequency::Yearly),
        ];

        let stats = SessionStatistics::compute(&session, &dysfunctions);

        // (156.25 + 468.75) / 2
        assert_eq!(
            stats.average_cost_per_dysfunction.unwrap().amount(),
            dec!(312.50)
        );
    }

    #[test]
    fn recompute_on_same_inputs_is_identical() {
        let session = session_with_revenue();
        let dysfunctions = vec![dysfunction_for(&session, 45, Frequency::Weekly)];

        let first = SessionStatistics::compute(&session, &dysfunctions);
        let second = SessionStatistics::compute(&session, &dysfunctions);

        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }
}
