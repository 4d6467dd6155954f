//! Session module - diagnostic interview lifecycle and rate derivation.

mod aggregate;
mod economics;
mod errors;
mod events;

pub use aggregate::{RateChange, Session, MAX_TITLE_LENGTH};
pub use economics::{EconomicInputs, RateDerivation};
pub use errors::SessionError;
pub use events::{
    EconomicInputsChanged, SessionArchived, SessionCostsRefreshed, SessionCreated, SessionDeleted,
};
