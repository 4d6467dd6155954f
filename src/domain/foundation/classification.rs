//! ISEOR dysfunction classification: the five indicators and four
//! cost components, plus the flag set carried by each dysfunction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five fixed ISEOR outcome indicators.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Absenteeism,
    WorkplaceAccidents,
    StaffTurnover,
    QualityDefects,
    ProductivityGaps,
}

impl Indicator {
    /// All five indicators, in the order the 5x4 table lists its rows.
    pub const ALL: [Indicator; 5] = [
        Indicator::Absenteeism,
        Indicator::WorkplaceAccidents,
        Indicator::StaffTurnover,
        Indicator::QualityDefects,
        Indicator::ProductivityGaps,
    ];

    /// Stable key used in serialized aggregates.
    pub fn key(&self) -> &'static str {
        match self {
            Indicator::Absenteeism => "absenteeism",
            Indicator::WorkplaceAccidents => "workplace_accidents",
            Indicator::StaffTurnover => "staff_turnover",
            Indicator::QualityDefects => "quality_defects",
            Indicator::ProductivityGaps => "productivity_gaps",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// One of the four fixed ISEOR cost components.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CostComponent {
    ExcessTime,
    ExcessConsumption,
    Overproduction,
    NonProduction,
}

impl CostComponent {
    /// All four components, in the order the 5x4 table lists its columns.
    pub const ALL: [CostComponent; 4] = [
        CostComponent::ExcessTime,
        CostComponent::ExcessConsumption,
        CostComponent::Overproduction,
        CostComponent::NonProduction,
    ];

    /// Stable key used in serialized aggregates.
    pub fn key(&self) -> &'static str {
        match self {
            CostComponent::ExcessTime => "excess_time",
            CostComponent::ExcessConsumption => "excess_consumption",
            CostComponent::Overproduction => "overproduction",
            CostComponent::NonProduction => "non_production",
        }
    }
}

impl fmt::Display for CostComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// The independent indicator/component flags on a dysfunction.
///
/// Flags are not mutually exclusive and carry no completeness requirement;
/// a dysfunction may legitimately have none set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(default)]
    pub absenteeism: bool,
    #[serde(default)]
    pub workplace_accidents: bool,
    #[serde(default)]
    pub staff_turnover: bool,
    #[serde(default)]
    pub quality_defects: bool,
    #[serde(default)]
    pub productivity_gaps: bool,

    #[serde(default)]
    pub excess_time: bool,
    #[serde(default)]
    pub excess_consumption: bool,
    #[serde(default)]
    pub overproduction: bool,
    #[serde(default)]
    pub non_production: bool,
}

impl Classification {
    /// Builds a classification from indicator/component lists, as provided
    /// by taxonomy item defaults.
    pub fn from_flags(indicators: &[Indicator], components: &[CostComponent]) -> Self {
        let mut classification = Classification::default();
        for indicator in indicators {
            classification.set_indicator(*indicator, true);
        }
        for component in components {
            classification.set_component(*component, true);
        }
        classification
    }

    /// Whether the given indicator flag is set.
    pub fn has_indicator(&self, indicator: Indicator) -> bool {
        match indicator {
            Indicator::Absenteeism => self.absenteeism,
            Indicator::WorkplaceAccidents => self.workplace_accidents,
            Indicator::StaffTurnover => self.staff_turnover,
            Indicator::QualityDefects => self.quality_defects,
            Indicator::ProductivityGaps => self.productivity_gaps,
        }
    }

    /// Whether the given component flag is set.
    pub fn has_component(&self, component: CostComponent) -> bool {
        match component {
            CostComponent::ExcessTime => self.excess_time,
            CostComponent::ExcessConsumption => self.excess_consumption,
            CostComponent::Overproduction => self.overproduction,
            CostComponent::NonProduction => self.non_production,
        }
    }

    /// Sets or clears an indicator flag.
    pub fn set_indicator(&mut self, indicator: Indicator, value: bool) {
        match indicator {
            Indicator::Absenteeism => self.absenteeism = value,
            Indicator::WorkplaceAccidents => self.workplace_accidents = value,
            Indicator::StaffTurnover => self.staff_turnover = value,
            Indicator::QualityDefects => self.quality_defects = value,
            Indicator::ProductivityGaps => self.productivity_gaps = value,
        }
    }

    /// Sets or clears a component flag.
    pub fn set_component(&mut self, component: CostComponent, value: bool) {
        match component {
            CostComponent::ExcessTime => self.excess_time = value,
            CostComponent::ExcessConsumption => self.excess_consumption = value,
            CostComponent::Overproduction => self.overproduction = value,
            CostComponent::NonProduction => self.non_production = value,
        }
    }

    /// The indicators currently flagged.
    pub fn indicators(&self) -> Vec<Indicator> {
        Indicator::ALL
            .into_iter()
            .filter(|i| self.has_indicator(*i))
            .collect()
    }

    /// The components currently flagged.
    pub fn components(&self) -> Vec<CostComponent> {
        CostComponent::ALL
            .into_iter()
            .filter(|c| self.has_component(*c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_nothing_flagged() {
        let classification = Classification::default();
        assert!(classification.indicators().is_empty());
        assert!(classification.components().is_empty());
    }

    #[test]
    fn from_flags_sets_only_given_flags() {
        let classification = Classification::from_flags(
            &[Indicator::WorkplaceAccidents, Indicator::QualityDefects],
            &[CostComponent::ExcessTime],
        );

        assert!(classification.has_indicator(Indicator::WorkplaceAccidents));
        assert!(classification.has_indicator(Indicator::QualityDefects));
        assert!(!classification.has_indicator(Indicator::Absenteeism));
        assert!(classification.has_component(CostComponent::ExcessTime));
        assert!(!classification.has_component(CostComponent::NonProduction));
    }

    #[test]
    fn flags_are_independent() {
        let mut classification = Classification::default();
        classification.set_indicator(Indicator::Absenteeism, true);
        classification.set_component(CostComponent::Overproduction, true);
        classification.set_indicator(Indicator::Absenteeism, false);

        assert!(!classification.has_indicator(Indicator::Absenteeism));
        assert!(classification.has_component(CostComponent::Overproduction));
    }

    #[test]
    fn indicators_list_follows_table_row_order() {
        let mut classification = Classification::default();
        classification.set_indicator(Indicator::ProductivityGaps, true);
        classification.set_indicator(Indicator::Absenteeism, true);

        assert_eq!(
            classification.indicators(),
            vec![Indicator::Absenteeism, Indicator::ProductivityGaps]
        );
    }

    #[test]
    fn missing_fields_deserialize_as_false() {
        let classification: Classification =
            serde_json::from_str(r#"{"absenteeism": true}"#).unwrap();
        assert!(classification.absenteeism);
        assert!(!classification.excess_time);
    }
}
