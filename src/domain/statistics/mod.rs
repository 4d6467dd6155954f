//! Statistics module - aggregation engine and the session statistics facade.

mod aggregation;
mod facade;

pub use aggregation::{
    AggregationEngine, CostAggregation, CostBucket, DomainDistribution, FrequencyDistribution,
    IndicatorComponentTable,
};
pub use facade::SessionStatistics;
