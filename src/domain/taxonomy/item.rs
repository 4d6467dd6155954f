//! ISEOR reference taxonomy catalog items.

use serde::{Deserialize, Serialize};

use crate::domain::dysfunction::NewDysfunction;
use crate::domain::foundation::{
    AnalysisDomain, Classification, CostComponent, EntryMode, Frequency, Indicator, Priority,
    TaxonomyItemId,
};

/// Seed values applied when a catalog item is expanded into a dysfunction.
///
/// The consultant refines the figures in the interview; these keep bulk
/// creation cheap without inventing significant numbers.
pub const DEFAULT_FREQUENCY: Frequency = Frequency::Monthly;
pub const DEFAULT_MINUTES_PER_OCCURRENCE: u32 = 30;
pub const DEFAULT_PEOPLE_AFFECTED: u32 = 1;

/// One entry of the ISEOR reference taxonomy.
///
/// Items are curated reference data; the application reads them but never
/// writes them, so this type carries no mutation methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyItem {
    pub id: TaxonomyItemId,
    /// Numeric taxonomy code, e.g. "101".
    pub code: String,
    pub domain: AnalysisDomain,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub sub_themes: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub guiding_questions: Vec<String>,
    /// Indicators suggested for dysfunctions created from this item.
    #[serde(default)]
    pub default_indicators: Vec<Indicator>,
    /// Cost components suggested for dysfunctions created from this item.
    #[serde(default)]
    pub default_components: Vec<CostComponent>,
    pub active: bool,
    pub display_order: Option<u32>,
}

impl TaxonomyItem {
    /// Build the draft dysfunction this item expands into during bulk
    /// creation: the item's title and domain, its suggested classification,
    /// and placeholder impact figures.
    pub fn dysfunction_defaults(&self) -> NewDysfunction {
        NewDysfunction {
            description: self.title.clone(),
            frequency: DEFAULT_FREQUENCY,
            minutes_per_occurrence: DEFAULT_MINUTES_PER_OCCURRENCE,
            people_affected: DEFAULT_PEOPLE_AFFECTED,
            direct_cost: None,
            domain: Some(self.domain),
            taxonomy_item_id: Some(self.id),
            classification: Classification::from_flags(
                &self.default_indicators,
                &self.default_components,
            ),
            entry_mode: EntryMode::Catalog,
            priority: Priority::default(),
            comments: None,
        }
    }
}
