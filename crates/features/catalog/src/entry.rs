use castellan_kernel::prelude::{CategorySet, FilterCategory, IconId};
use serde::Serialize;

/// Sub-type tag of the Hunter's Lodge villa.
pub const HUNTERS_LODGE: &str = "hunters-lodge";
/// Sub-type tag of the Garden Suite apartment.
pub const GARDEN_SUITE: &str = "garden-suite";

const TOUR_HIGHLIGHTS: [&str; 3] =
    ["Duration: 50 minutes", "Adults: 75 RON", "Children (from 6 years): 35 RON"];
const EVENT_HIGHLIGHTS: [&str; 2] = ["Capacity: up to 200 people", "Events available 24/7"];
const LODGE_HIGHLIGHTS: [&str; 2] =
    ["2 bedrooms with double beds", "Check-in: 14:00 / Check-out: 12:00"];
const SUITE_HIGHLIGHTS: [&str; 2] =
    ["1 bedroom with double bed", "Check-in: 14:00 / Check-out: 12:00"];
const DINING_HIGHLIGHTS: [&str; 2] = ["Schedule: 12:00 - 23:00", "Capacity: 60 indoor seats"];
const ART_HIGHLIGHTS: [&str; 2] = ["Schedule: 10:00 - 18:00", "Permanent exhibition"];
const SHOP_HIGHLIGHTS: [&str; 2] = ["Schedule: 10:00 - 18:00", "Souvenirs and local crafts"];

/// One bookable or explorable offering of the venue. Immutable once the store is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Display name, unique within a catalog.
    pub title: &'static str,
    /// Free text matched by the search query.
    pub description: &'static str,
    /// Opaque asset reference, never interpreted here.
    pub image_ref: &'static str,
    /// Filter categories; never empty.
    pub categories: CategorySet,
    /// Deep-link tag distinguishing entries of one category (`garden-suite`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<&'static str>,
    pub icon: IconId,
}

impl CatalogEntry {
    pub const fn new(
        title: &'static str,
        description: &'static str,
        image_ref: &'static str,
        categories: CategorySet,
        icon: IconId,
    ) -> Self {
        Self { title, description, image_ref, categories, subtype: None, icon }
    }

    #[must_use]
    pub const fn with_subtype(mut self, subtype: &'static str) -> Self {
        self.subtype = Some(subtype);
        self
    }

    /// First category in display order.
    pub fn primary_category(&self) -> Option<FilterCategory> {
        self.categories.categories().next()
    }

    /// Category ids followed by the sub-type tag, if any.
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.categories.categories().map(FilterCategory::id).chain(self.subtype)
    }

    /// Whether any of the entry's categories is in `active`.
    pub const fn intersects(&self, active: CategorySet) -> bool {
        self.categories.intersects(active)
    }

    /// Case-insensitive substring match on title or description.
    ///
    /// `needle` must already be lowercase; an empty needle matches everything.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    /// Practical details shown on the entry's card, keyed by its primary category.
    pub fn highlights(&self) -> &'static [&'static str] {
        match self.primary_category() {
            Some(FilterCategory::Tours | FilterCategory::VipTours) => &TOUR_HIGHLIGHTS,
            Some(FilterCategory::Events) => &EVENT_HIGHLIGHTS,
            Some(FilterCategory::Accommodation) if self.subtype == Some(HUNTERS_LODGE) => {
                &LODGE_HIGHLIGHTS
            },
            Some(FilterCategory::Accommodation) => &SUITE_HIGHLIGHTS,
            Some(FilterCategory::Dining) => &DINING_HIGHLIGHTS,
            Some(FilterCategory::Art) => &ART_HIGHLIGHTS,
            Some(FilterCategory::Shop) => &SHOP_HIGHLIGHTS,
            None => &[],
        }
    }
}
