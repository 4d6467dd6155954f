//! The six fixed ISEOR analysis domains.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// One of the six ISEOR domains a dysfunction can be filed under.
///
/// Stored and transported as its 1-6 index, matching the methodology's
/// numbering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum AnalysisDomain {
    WorkingConditions,
    WorkOrganization,
    Communication,
    TimeManagement,
    IntegratedTraining,
    StrategicImplementation,
}

impl AnalysisDomain {
    /// All six domains in index order.
    pub const ALL: [AnalysisDomain; 6] = [
        AnalysisDomain::WorkingConditions,
        AnalysisDomain::WorkOrganization,
        AnalysisDomain::Communication,
        AnalysisDomain::TimeManagement,
        AnalysisDomain::IntegratedTraining,
        AnalysisDomain::StrategicImplementation,
    ];

    /// The 1-based ISEOR index.
    pub fn index(&self) -> u8 {
        match self {
            AnalysisDomain::WorkingConditions => 1,
            AnalysisDomain::WorkOrganization => 2,
            AnalysisDomain::Communication => 3,
            AnalysisDomain::TimeManagement => 4,
            AnalysisDomain::IntegratedTraining => 5,
            AnalysisDomain::StrategicImplementation => 6,
        }
    }

    /// Resolves a 1-6 index into a domain.
    pub fn from_index(index: u8) -> Result<Self, ValidationError> {
        match index {
            1 => Ok(AnalysisDomain::WorkingConditions),
            2 => Ok(AnalysisDomain::WorkOrganization),
            3 => Ok(AnalysisDomain::Communication),
            4 => Ok(AnalysisDomain::TimeManagement),
            5 => Ok(AnalysisDomain::IntegratedTraining),
            6 => Ok(AnalysisDomain::StrategicImplementation),
            other => Err(ValidationError::out_of_range("domain", 1, 6, other as i64)),
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisDomain::WorkingConditions => "Working conditions",
            AnalysisDomain::WorkOrganization => "Work organization",
            AnalysisDomain::Communication => "Communication-coordination-cooperation",
            AnalysisDomain::TimeManagement => "Time management",
            AnalysisDomain::IntegratedTraining => "Integrated training",
            AnalysisDomain::StrategicImplementation => "Strategic implementation",
        }
    }
}

impl From<AnalysisDomain> for u8 {
    fn from(domain: AnalysisDomain) -> u8 {
        domain.index()
    }
}

impl TryFrom<u8> for AnalysisDomain {
    type Error = ValidationError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        AnalysisDomain::from_index(index)
    }
}

impl fmt::Display for AnalysisDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.index(), self.label())
    }
}
