//! Serde helpers for PATCH-style request bodies.

use serde::{Deserialize, Deserializer};

/// Distinguishes an absent JSON field from an explicit `null`.
///
/// `None` leaves the target unchanged; `Some(None)` clears it.
pub(crate) fn double_option<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Deserialize::deserialize(de).map(Some)
}
