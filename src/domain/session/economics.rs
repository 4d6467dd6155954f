//! Session economic inputs and hourly-rate (PRISM) derivation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Money, ValidationError};

/// The optional pre-interview economic inputs of a session.
///
/// Each field is independently nullable; validation bounds individual
/// fields but never requires the set to be complete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomicInputs {
    /// Revenue of the studied scope.
    pub scope_revenue: Option<Money>,

    /// Gross margin as a percentage, 0 to 100.
    pub gross_margin_percent: Option<Decimal>,

    /// Hours worked per year across the scope.
    pub hours_worked_per_year: Option<u32>,

    /// Headcount of the studied scope.
    pub headcount: Option<u32>,
}

impl EconomicInputs {
    /// Validates individual field ranges.
    ///
    /// # Errors
    ///
    /// - `Negative` for a negative scope revenue
    /// - `OutOfRange` for a margin outside 0-100 or a zero hours/headcount
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(revenue) = self.scope_revenue {
            if revenue.amount().is_sign_negative() {
                return Err(ValidationError::negative("scope_revenue"));
            }
        }
        if let Some(margin) = self.gross_margin_percent {
            if margin < Decimal::ZERO || margin > Decimal::ONE_HUNDRED {
                return Err(ValidationError::invalid_format(
                    "gross_margin_percent",
                    "must be between 0 and 100",
                ));
            }
        }
        if self.hours_worked_per_year == Some(0) {
            return Err(ValidationError::out_of_range(
                "hours_worked_per_year",
                1,
                i64::MAX,
                0,
            ));
        }
        if self.headcount == Some(0) {
            return Err(ValidationError::out_of_range("headcount", 1, i64::MAX, 0));
        }
        Ok(())
    }
}

/// Derives the session hourly rate ("PRISM") from the economic inputs.
pub struct RateDerivation;

impl RateDerivation {
    /// Computes `scope_revenue * (gross_margin_percent / 100) / hours`.
    ///
    /// The rate is defined only when revenue, margin, and hours are all
    /// present and strictly positive. Anything less yields `None`; no
    /// partial or fallback value is ever produced.
    pub fn derive(inputs: &EconomicInputs) -> Option<Money> {
        let revenue = inputs.scope_revenue.filter(Money::is_positive)?;
        let margin = inputs
            .gross_margin_percent
            .filter(|m| *m > Decimal::ZERO)?;
        let hours = inputs.hours_worked_per_year.filter(|h| *h > 0)?;

        let margin_fraction = margin / Decimal::ONE_HUNDRED;
        let rate = revenue.amount() * margin_fraction / Decimal::from(hours);
        Some(Money::new(rate))
    }
}
