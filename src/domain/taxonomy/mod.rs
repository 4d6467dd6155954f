//! Taxonomy module - the ISEOR reference catalog of known dysfunctions.

mod item;

pub use item::{
    TaxonomyItem, DEFAULT_FREQUENCY, DEFAULT_MINUTES_PER_OCCURRENCE, DEFAULT_PEOPLE_AFFECTED,
};
