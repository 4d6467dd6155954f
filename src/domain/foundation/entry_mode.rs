//! How a dysfunction record was entered.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Origin of a dysfunction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryMode {
    /// Free-form entry typed by the consultant.
    Free,
    /// Entered through the guided interview flow.
    Guided,
    /// Pre-populated from a reference taxonomy item.
    Catalog,
}

impl Default for EntryMode {
    fn default() -> Self {
        EntryMode::Free
    }
}

impl fmt::Display for EntryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntryMode::Free => "free",
            EntryMode::Guided => "guided",
            EntryMode::Catalog => "catalog",
        };
        write!(f, "{}", s)
    }
}
