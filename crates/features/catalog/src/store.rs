use crate::entry::{CatalogEntry, GARDEN_SUITE, HUNTERS_LODGE};
use crate::error::CatalogError;
use crate::filter::FilterState;
use crate::reveal::{RevealController, Viewport};
use castellan_kernel::prelude::{CategorySet, IconId};
use fxhash::FxHashSet;
use std::sync::Arc;

static CASTLE_CATALOG: [CatalogEntry; 11] = [
    CatalogEntry::new(
        "Individual Tour",
        "Explore the castle at your own pace, with access to all public areas",
        "/images/Cantacuzino-exterior2.jpg",
        CategorySet::TOURS,
        IconId::Ticket,
    ),
    CatalogEntry::new(
        "Group Tour",
        "Guided tour for groups, with detailed presentation of castle history",
        "/images/castel-cantacuzino-gallery-6.jpg",
        CategorySet::TOURS,
        IconId::Ticket,
    ),
    CatalogEntry::new(
        "VIP Tours",
        "Exclusive experience with dedicated guide and access to special areas",
        "/images/09e58b0d6b41579f5b525b587929f897.jpg",
        CategorySet::VIP_TOURS,
        IconId::Crown,
    ),
    CatalogEntry::new(
        "Private Events",
        "Organize private events in a unique historical setting",
        "/images/ev-5.png",
        CategorySet::EVENTS,
        IconId::Camera,
    ),
    CatalogEntry::new(
        "Weddings",
        "The perfect location for your fairy tale wedding",
        "/images/image.png",
        CategorySet::EVENTS,
        IconId::Camera,
    ),
    CatalogEntry::new(
        "Corporate Events",
        "Versatile spaces for conferences and business events",
        "/images/ev-2.png",
        CategorySet::EVENTS,
        IconId::Camera,
    ),
    CatalogEntry::new(
        "Art Gallery",
        "Experience 'Bestiar' - featuring works by Picasso and Salvador Dali from the Adrian Șocu Collection",
        "/images/bdc678_aedf3baf27dc467f82dea2cbb56189b2mv2.jpg",
        CategorySet::ART,
        IconId::Gallery,
    ),
    CatalogEntry::new(
        "Hunter's Lodge",
        "Exclusive villa in the castle gardens",
        "/images/camera-1.png",
        CategorySet::ACCOMMODATION,
        IconId::Home,
    )
    .with_subtype(HUNTERS_LODGE),
    CatalogEntry::new(
        "Garden Suite",
        "Elegant apartment inside the castle",
        "/images/camera-4.png",
        CategorySet::ACCOMMODATION,
        IconId::Hotel,
    )
    .with_subtype(GARDEN_SUITE),
    CatalogEntry::new(
        "Shop",
        "Browse our curated collection of castle souvenirs and local artisanal pieces",
        "/images/bdc678_60ce07aa20024959abdedc8188360fad.jpeg",
        CategorySet::SHOP,
        IconId::ShoppingBag,
    ),
    CatalogEntry::new(
        "Canta Cuisine",
        "Savor our delightful culinary offerings",
        "/images/Foto-209-1030x687.jpg",
        CategorySet::DINING,
        IconId::Utensils,
    ),
];

/// Immutable, ordered catalog. Cloning shares the entries.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    entries: Arc<[CatalogEntry]>,
}

/// Result of one browse pass: the filtered set clipped for the viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView<'a> {
    /// Entries to display, in catalog order.
    pub entries: Vec<&'a CatalogEntry>,
    /// Size of the filtered set before clipping.
    pub total: usize,
    pub reveal_count: usize,
    /// Whether a "load more" advance would expose further entries.
    pub can_load_more: bool,
}

impl CatalogStore {
    /// The venue's fixed catalog.
    pub fn castle() -> Self {
        Self { entries: Arc::from(CASTLE_CATALOG.as_slice()) }
    }

    /// Builds a store from arbitrary entries.
    ///
    /// # Errors
    /// Returns [`CatalogError::InvalidEntry`] for an entry without categories or a repeated title.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut titles = FxHashSet::default();
        for entry in &entries {
            if entry.categories.is_empty() {
                return Err(CatalogError::InvalidEntry {
                    message: format!("'{}' has no category", entry.title).into(),
                    context: None,
                });
            }
            if !titles.insert(entry.title) {
                return Err(CatalogError::InvalidEntry {
                    message: format!("'{}' appears twice", entry.title).into(),
                    context: None,
                });
            }
        }
        Ok(Self { entries: entries.into() })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, title: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.title == title)
    }

    pub fn titles(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.title)
    }

    /// Filters the catalog, then clips the result for the viewport.
    pub fn browse(
        &self,
        filter: &FilterState,
        reveal: &RevealController,
        viewport: Viewport,
    ) -> CatalogView<'_> {
        let filtered = filter.apply(&self.entries);
        let total = filtered.len();
        let visible = reveal.visible(&filtered, viewport).len();
        let can_load_more = viewport == Viewport::Narrow && reveal.can_advance(total);

        let mut entries = filtered;
        entries.truncate(visible);

        CatalogView { entries, total, reveal_count: reveal.reveal_count(), can_load_more }
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::castle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use castellan_kernel::prelude::FilterCategory;

    #[test]
    fn castle_catalog_is_valid() {
        let store = CatalogStore::new(CASTLE_CATALOG.to_vec()).unwrap();
        assert_eq!(store.len(), 11);
        assert_eq!(store.entries()[0].title, "Individual Tour");
        assert_eq!(store.entries()[10].title, "Canta Cuisine");
    }

    #[test]
    fn every_filter_category_has_an_entry() {
        let store = CatalogStore::castle();
        for category in FilterCategory::ALL {
            assert!(
                store.entries().iter().any(|entry| entry.categories.has(category)),
                "{category} has no entry"
            );
        }
    }

    #[test]
    fn rejects_duplicate_titles() {
        let entry = CASTLE_CATALOG[0].clone();
        let err = CatalogStore::new(vec![entry.clone(), entry]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidEntry { .. }));
    }

    #[test]
    fn rejects_untagged_entries() {
        let entry = CatalogEntry { categories: CategorySet::empty(), ..CASTLE_CATALOG[0].clone() };
        assert!(CatalogStore::new(vec![entry]).is_err());
    }

    #[test]
    fn get_looks_up_by_exact_title() {
        let store = CatalogStore::castle();
        assert_eq!(store.get("Garden Suite").and_then(|e| e.subtype), Some(GARDEN_SUITE));
        assert!(store.get("garden suite").is_none());
    }

    #[test]
    fn browse_clips_only_on_narrow_viewports() {
        let store = CatalogStore::castle();
        let filter = FilterState::default();
        let reveal = RevealController::default();

        let wide = store.browse(&filter, &reveal, Viewport::Wide);
        assert_eq!(wide.entries.len(), 11);
        assert!(!wide.can_load_more);

        let narrow = store.browse(&filter, &reveal, Viewport::Narrow);
        assert_eq!(narrow.entries.len(), 3);
        assert_eq!(narrow.total, 11);
        assert!(narrow.can_load_more);
    }
}
