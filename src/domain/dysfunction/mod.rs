//! Dysfunction module - recorded malfunctions and their cost derivation.

mod aggregate;
mod cost;
mod errors;
mod events;

pub use aggregate::{Dysfunction, ImpactUpdate, NewDysfunction};
pub use cost::{ComputedCost, CostCalculator};
pub use errors::DysfunctionError;
pub use events::{
    DysfunctionClassified, DysfunctionDeleted, DysfunctionRecorded, DysfunctionUpdated,
    DysfunctionsBulkRecorded,
};
