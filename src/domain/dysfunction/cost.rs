//! Dysfunction cost derivation.
//!
//! Turns a dysfunction's raw impact figures into a unit cost and an
//! annualized cost, priced off the owning session's hourly rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Frequency, Money};

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// The pair of derived cost figures carried by a dysfunction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedCost {
    /// Cost of a single occurrence.
    pub unit_cost: Money,
    /// Unit cost annualized by the frequency multiplier.
    pub annual_cost: Money,
}

/// Calculator for dysfunction unit and annual costs.
pub struct CostCalculator;

impl CostCalculator {
    /// Computes both cost figures, or `None` when the session has no rate.
    ///
    /// With no hourly rate nothing is computed at all - not even a partial
    /// value from `direct_cost` alone. A half-priced figure would read as a
    /// real cost in every report downstream.
    ///
    /// Formula: `unit = minutes/60 * rate * people + direct`,
    /// `annual = unit * frequency multiplier`.
    pub fn compute(
        hourly_rate: Option<Money>,
        minutes_per_occurrence: u32,
        people_affected: u32,
        direct_cost: Money,
        frequency: Frequency,
    ) -> Option<ComputedCost> {
        let rate = hourly_rate?;

        let hours = Decimal::from(minutes_per_occurrence) / MINUTES_PER_HOUR;
        let time_cost = rate
            .scale_by(hours)
            .scale_by(Decimal::from(people_affected));
        let unit_cost = time_cost + direct_cost;
        let annual_cost = unit_cost.scale_by(Decimal::from(frequency.annual_multiplier()));

        Some(ComputedCost {
            unit_cost,
            annual_cost,
        })
    }
}
