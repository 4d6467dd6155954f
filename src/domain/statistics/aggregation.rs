//! Cost aggregation over a session's dysfunctions.
//!
//! Everything here is a pure fold over the dysfunction list. Dysfunctions
//! with an undefined cost still count toward record totals but contribute
//! zero monetary amount, so partially priced sessions aggregate without
//! special cases.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::dysfunction::Dysfunction;
use crate::domain::foundation::{AnalysisDomain, CostComponent, Frequency, Indicator, Money};

/// Record count plus summed annual cost for one aggregation bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBucket {
    pub count: usize,
    pub total_cost: Money,
}

impl CostBucket {
    fn record(&mut self, annual_cost: Money) {
        self.count += 1;
        self.total_cost += annual_cost;
    }
}

/// Per-domain breakdown of count and cost.
///
/// All six domains are always present, zeroed when empty, so chart
/// consumers never have to fill gaps. Unclassified dysfunctions are
/// excluded; they still appear in the session totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainDistribution(BTreeMap<AnalysisDomain, CostBucket>);

impl DomainDistribution {
    pub fn new() -> Self {
        Self(
            AnalysisDomain::ALL
                .iter()
                .map(|domain| (*domain, CostBucket::default()))
                .collect(),
        )
    }

    fn record(&mut self, domain: Option<AnalysisDomain>, annual_cost: Money) {
        if let Some(domain) = domain {
            self.0
                .entry(domain)
                .or_default()
                .record(annual_cost);
        }
    }

    pub fn bucket(&self, domain: AnalysisDomain) -> &CostBucket {
        &self.0[&domain]
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnalysisDomain, &CostBucket)> {
        self.0.iter().map(|(domain, bucket)| (*domain, bucket))
    }

    /// Count of dysfunctions that carry a domain assignment.
    pub fn classified_count(&self) -> usize {
        self.0.values().map(|bucket| bucket.count).sum()
    }
}

impl Default for DomainDistribution {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-frequency breakdown of count and cost.
///
/// Unlike the domain breakdown this is sparse: only frequencies that
/// actually occur in the session appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyDistribution(BTreeMap<Frequency, CostBucket>);

impl FrequencyDistribution {
    fn record(&mut self, frequency: Frequency, annual_cost: Money) {
        self.0.entry(frequency).or_default().record(annual_cost);
    }

    pub fn count(&self, frequency: Frequency) -> usize {
        self.0
            .get(&frequency)
            .map(|bucket| bucket.count)
            .unwrap_or(0)
    }

    pub fn total_cost(&self, frequency: Frequency) -> Money {
        self.0
            .get(&frequency)
            .map(|bucket| bucket.total_cost)
            .unwrap_or(Money::ZERO)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Frequency, &CostBucket)> {
        self.0.iter().map(|(frequency, bucket)| (*frequency, bucket))
    }
}

/// The ISEOR 5x4 cross table: annual cost per (indicator, component) pair.
///
/// A dysfunction's full annual cost lands in every cell whose indicator
/// and component flags it carries. The grand total therefore exceeds the
/// session total whenever records carry multiple flags; the table reads
/// as "cost attributable to" each pair, not as a partition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndicatorComponentTable {
    cells: [[Money; CostComponent::ALL.len()]; Indicator::ALL.len()],
    indicator_counts: [usize; Indicator::ALL.len()],
    component_counts: [usize; CostComponent::ALL.len()],
}

impl IndicatorComponentTable {
    fn record(&mut self, dysfunction: &Dysfunction) {
        let annual_cost = dysfunction.annual_cost_or_zero();
        let classification = dysfunction.classification();
        for (row, indicator) in Indicator::ALL.iter().enumerate() {
            if !classification.has_indicator(*indicator) {
                continue;
            }
            self.indicator_counts[row] += 1;
            for (col, component) in CostComponent::ALL.iter().enumerate() {
                if classification.has_component(*component) {
                    self.cells[row][col] += annual_cost;
                }
            }
        }
        for (col, component) in CostComponent::ALL.iter().enumerate() {
            if classification.has_component(*component) {
                self.component_counts[col] += 1;
            }
        }
    }

    pub fn cell(&self, indicator: Indicator, component: CostComponent) -> Money {
        self.cells[Self::row(indicator)][Self::col(component)]
    }

    fn row(indicator: Indicator) -> usize {
        match indicator {
            Indicator::Absenteeism => 0,
            Indicator::WorkplaceAccidents => 1,
            Indicator::StaffTurnover => 2,
            Indicator::QualityDefects => 3,
            Indicator::ProductivityGaps => 4,
        }
    }

    fn col(component: CostComponent) -> usize {
        match component {
            CostComponent::ExcessTime => 0,
            CostComponent::ExcessConsumption => 1,
            CostComponent::Overproduction => 2,
            CostComponent::NonProduction => 3,
        }
    }

    /// Number of records carrying the given indicator flag.
    pub fn row_count(&self, indicator: Indicator) -> usize {
        self.indicator_counts[Self::row(indicator)]
    }

    /// Number of records carrying the given component flag.
    pub fn column_count(&self, component: CostComponent) -> usize {
        self.component_counts[Self::col(component)]
    }

    pub fn row_total(&self, indicator: Indicator) -> Money {
        CostComponent::ALL
            .iter()
            .map(|component| self.cell(indicator, *component))
            .sum()
    }

    pub fn column_total(&self, component: CostComponent) -> Money {
        Indicator::ALL
            .iter()
            .map(|indicator| self.cell(*indicator, component))
            .sum()
    }

    pub fn grand_total(&self) -> Money {
        Indicator::ALL
            .iter()
            .map(|indicator| self.row_total(*indicator))
            .sum()
    }
}

// Serialized as nested maps keyed by the stable indicator/component keys,
// matching the wire shape charts consume.
impl Serialize for IndicatorComponentTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Indicator::ALL.len()))?;
        for (row, indicator) in Indicator::ALL.iter().enumerate() {
            let cells: BTreeMap<&'static str, Money> = CostComponent::ALL
                .iter()
                .enumerate()
                .map(|(col, component)| (component.key(), self.cells[row][col]))
                .collect();
            map.serialize_entry(indicator.key(), &cells)?;
        }
        map.end()
    }
}

/// Full aggregation output for one session's dysfunction list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostAggregation {
    pub dysfunction_count: usize,
    pub total_annual_cost: Money,
    pub domain_distribution: DomainDistribution,
    pub frequency_distribution: FrequencyDistribution,
    pub indicator_component_table: IndicatorComponentTable,
}

/// Stateless fold of a dysfunction list into its aggregate view.
pub struct AggregationEngine;

impl AggregationEngine {
    /// Aggregate the given dysfunctions. Input order does not affect the
    /// result.
    pub fn aggregate(dysfunctions: &[Dysfunction]) -> CostAggregation {
        let mut total_annual_cost = Money::ZERO;
        let mut domain_distribution = DomainDistribution::new();
        let mut frequency_distribution = FrequencyDistribution::default();
        let mut indicator_component_table = IndicatorComponentTable::default();

        for dysfunction in dysfunctions {
            let annual_cost = dysfunction.annual_cost_or_zero();
            total_annual_cost += annual_cost;
            domain_distribution.record(dysfunction.domain(), annual_cost);
            frequency_distribution.record(dysfunction.frequency(), annual_cost);
            indicator_component_table.record(dysfunction);
        }

        CostAggregation {
            dysfunction_count: dysfunctions.len(),
            total_annual_cost,
            domain_distribution,
            frequency_distribution,
            indicator_component_table,
        }
    }
}
