//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the hidden-costs domain.

mod analysis_domain;
mod classification;
mod command;
mod entry_mode;
mod errors;
mod events;
mod frequency;
mod ids;
mod money;
mod priority;
mod session_status;
mod timestamp;

pub use analysis_domain::AnalysisDomain;
pub use classification::{Classification, CostComponent, Indicator};
pub use command::CommandMetadata;
pub use entry_mode::EntryMode;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata};
pub use frequency::Frequency;
pub use ids::{DysfunctionId, SessionId, TaxonomyItemId, UserId};
pub use money::Money;
pub use priority::Priority;
pub use session_status::SessionStatus;
pub use timestamp::Timestamp;
